//! Greedy single-pass English dependency parser.
//!
//! Predicates (verbs and copular auxiliaries) are located first and each one
//! is classified by whatever opens its clause. A left-to-right scan then
//! chunks noun phrases and hangs every phrase head on the nearest plausible
//! governor. Tokens nothing claims become `dep` of the root, and a final
//! repair pass breaks any cycle, so the output is always a single tree.

use relex_protocol::{DepLabel, PosTag};

use crate::tagger::POSSESSIVES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedToken<'a> {
    pub text: &'a str,
    pub pos: PosTag,
}

impl<'a> TaggedToken<'a> {
    pub fn new(text: &'a str, pos: PosTag) -> Self {
        Self { text, pos }
    }

    fn is(&self, word: &str) -> bool {
        self.text.eq_ignore_ascii_case(word)
    }

    fn is_any(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.is(w))
    }

    fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub head_index: usize,
    pub dependent_index: usize,
    pub role: DepLabel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    /// `None` only for an empty sentence.
    pub root: Option<usize>,
    /// One entry per non-root token, ordered by dependent index.
    pub deps: Vec<Dependency>,
}

impl SyntaxTree {
    pub fn head_of(&self, index: usize) -> Option<&Dependency> {
        self.deps.iter().find(|d| d.dependent_index == index)
    }
}

const BE_FORMS: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "'s", "'re", "'m", "get", "gets", "got",
];

const IRREGULAR_PARTICIPLES: &[&str] = &[
    "made", "built", "found", "known", "seen", "given", "taken", "written", "sold", "held", "told",
    "paid", "bought", "led", "caught", "taught", "brought", "thought", "left", "sent", "kept",
    "done", "put", "cut", "hit", "read", "shut", "won", "lost", "born", "bitten", "eaten", "chosen",
    "driven", "shown", "spoken", "stolen", "worn", "thrown", "grown", "drawn", "broken", "begun",
    "fallen", "hidden", "forgotten", "understood", "heard", "felt", "met", "sung",
];

const RELATIVE_PRONOUNS: &[&str] = &["who", "whom", "which", "that"];
const OBJECT_PRONOUNS: &[&str] = &["me", "him", "us", "them", "whom"];
const PARTICLES: &[&str] = &["up", "out", "off", "down", "over", "away", "back"];
const COMPLEMENTIZERS: &[&str] = &["that", "whether"];
const NEGATIONS: &[&str] = &["not", "n't", "never"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseKind {
    Main,
    /// "to run"
    Infinitive { to: usize },
    /// "because he left", "that he left"
    Adverbial { mark: usize },
    /// "the dog that bit me"
    Relative { pronoun: usize, antecedent: usize },
    /// "by running"
    PrepComplement { prep: usize },
    /// "the man sitting there"
    Participle { noun: usize },
}

#[derive(Debug, Clone)]
struct Predicate {
    index: usize,
    kind: ClauseKind,
    passive: bool,
    copula: bool,
    auxes: Vec<usize>,
}

impl Predicate {
    fn start(&self) -> usize {
        self.auxes.first().copied().unwrap_or(self.index)
    }

    /// Can the nominal at `i` be this predicate's subject?
    fn hosts_subject(&self, i: usize) -> bool {
        match self.kind {
            ClauseKind::Main => true,
            ClauseKind::Adverbial { mark } => mark < i,
            ClauseKind::Relative { pronoun, .. } => pronoun < i,
            _ => false,
        }
    }

    fn embedded(&self) -> bool {
        !matches!(self.kind, ClauseKind::Main | ClauseKind::Adverbial { .. })
    }
}

fn is_possessive_form(text: &str) -> bool {
    text.ends_with("'s") || text.ends_with("’s")
}

/// Index of the verb an auxiliary at `i` leads to, if any.
fn next_verbal(tokens: &[TaggedToken], i: usize) -> Option<usize> {
    let question = i == 0;
    for (j, token) in tokens.iter().enumerate().skip(i + 1) {
        match token.pos {
            PosTag::Verb => return Some(j),
            PosTag::Adv | PosTag::Part | PosTag::Aux => {}
            PosTag::Det | PosTag::Noun | PosTag::Propn | PosTag::Pron | PosTag::Adj | PosTag::Num if question => {}
            _ => return None,
        }
    }
    None
}

fn next_is_aux(tokens: &[TaggedToken], i: usize) -> bool {
    tokens[i + 1..]
        .iter()
        .find(|t| !matches!(t.pos, PosTag::Adv | PosTag::Part))
        .map(|t| t.pos == PosTag::Aux)
        .unwrap_or(false)
}

fn is_passive(tokens: &[TaggedToken], auxes: &[usize], verb: usize) -> bool {
    let Some(&last) = auxes.last() else { return false };
    if !tokens[last].is_any(BE_FORMS) {
        return false;
    }
    let text = tokens[verb].lower();
    !text.ends_with("ing")
        && (text.ends_with("ed") || text.ends_with("en") || IRREGULAR_PARTICIPLES.contains(&text.as_str()))
}

fn has_cconj(tokens: &[TaggedToken], from: usize, to: usize) -> bool {
    from < to && tokens[from + 1..to].iter().any(|t| t.pos == PosTag::Cconj)
}

fn classify(tokens: &[TaggedToken], preds: &[Predicate], k: usize) -> ClauseKind {
    let p = &preds[k];
    let floor = if k == 0 { 0 } else { preds[k - 1].index + 1 };
    let start = p.start();

    // Look through adverbs and negation for "to" or a governing preposition
    let mut b = start;
    while b > floor && (tokens[b - 1].pos == PosTag::Adv || tokens[b - 1].is_any(NEGATIONS)) {
        b -= 1;
    }
    if b > floor {
        let before = &tokens[b - 1];
        if before.pos == PosTag::Part && before.is("to") {
            return ClauseKind::Infinitive { to: b - 1 };
        }
        if before.pos == PosTag::Adp && tokens[p.index].lower().ends_with("ing") {
            return ClauseKind::PrepComplement { prep: b - 1 };
        }
    }

    for j in (floor..start).rev() {
        let t = &tokens[j];
        if t.pos == PosTag::Sconj {
            return ClauseKind::Adverbial { mark: j };
        }
        if t.pos == PosTag::Pron && t.is_any(RELATIVE_PRONOUNS) && j > 0 {
            let mut a = j - 1;
            if tokens[a].text == "," && a > 0 {
                a -= 1;
            }
            if tokens[a].pos.is_nominal() {
                return ClauseKind::Relative { pronoun: j, antecedent: a };
            }
        }
    }

    if p.auxes.is_empty() && start > 0 && matches!(tokens[start - 1].pos, PosTag::Noun | PosTag::Propn) {
        let text = tokens[p.index].lower();
        if text.ends_with("ing") && preds.len() > 1 {
            return ClauseKind::Participle { noun: start - 1 };
        }
        let followed_by_prep = tokens.get(p.index + 1).map(|t| t.pos == PosTag::Adp).unwrap_or(false);
        let participle = text.ends_with("ed") || IRREGULAR_PARTICIPLES.contains(&text.as_str());
        if participle && k > 0 && followed_by_prep && !has_cconj(tokens, preds[k - 1].index, start) {
            return ClauseKind::Participle { noun: start - 1 };
        }
    }

    ClauseKind::Main
}

fn find_predicates(tokens: &[TaggedToken]) -> Vec<Predicate> {
    let mut preds: Vec<Predicate> = Vec::new();
    let mut auxes = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token.pos {
            PosTag::Aux if next_is_aux(tokens, i) || next_verbal(tokens, i).is_some() => auxes.push(i),
            PosTag::Aux => preds.push(Predicate {
                index: i,
                kind: ClauseKind::Main,
                passive: false,
                copula: true,
                auxes: std::mem::take(&mut auxes),
            }),
            PosTag::Verb => {
                let passive = is_passive(tokens, &auxes, i);
                preds.push(Predicate {
                    index: i,
                    kind: ClauseKind::Main,
                    passive,
                    copula: false,
                    auxes: std::mem::take(&mut auxes),
                });
            }
            _ => {}
        }
    }

    for k in 0..preds.len() {
        preds[k].kind = classify(tokens, &preds, k);
    }
    preds
}

fn pick_root(tokens: &[TaggedToken], preds: &[Predicate]) -> usize {
    preds
        .iter()
        .find(|p| p.kind == ClauseKind::Main)
        .or_else(|| preds.first())
        .map(|p| p.index)
        .or_else(|| tokens.iter().position(|t| t.pos.is_nominal()))
        .or_else(|| tokens.iter().position(|t| t.pos != PosTag::Punct))
        .unwrap_or(0)
}

struct Arcs {
    root: usize,
    heads: Vec<Option<(usize, DepLabel)>>,
}

impl Arcs {
    fn attach(&mut self, dependent: usize, head: usize, role: DepLabel) {
        if dependent == self.root || dependent == head || self.heads[dependent].is_some() {
            return;
        }
        self.heads[dependent] = Some((head, role));
    }

    fn relink(&mut self, dependent: usize, head: usize, role: DepLabel) {
        if dependent != self.root && dependent != head {
            self.heads[dependent] = Some((head, role));
        }
    }

    fn is_attached(&self, i: usize) -> bool {
        self.heads[i].is_some()
    }

    fn head(&self, i: usize) -> Option<usize> {
        self.heads[i].map(|(h, _)| h)
    }

    fn role(&self, i: usize) -> Option<DepLabel> {
        self.heads[i].map(|(_, r)| r)
    }

    fn reaches_root(&self, i: usize) -> bool {
        let mut cur = i;
        for _ in 0..=self.heads.len() {
            if cur == self.root {
                return true;
            }
            match self.head(cur) {
                Some(h) => cur = h,
                None => return false,
            }
        }
        false
    }
}

struct Scanner<'t, 'a> {
    tokens: &'t [TaggedToken<'a>],
    preds: &'t [Predicate],
    pred_at: Vec<Option<usize>>,
    aux_of: Vec<Option<usize>>,
    arcs: Arcs,
    objects: Vec<Vec<usize>>,
    conj_pairs: Vec<(usize, usize)>,
    open_prep: Option<usize>,
    pending: Vec<usize>,
    current: Option<usize>,
    last_nominal: Option<usize>,
    pending_cc: Option<usize>,
}

impl<'t, 'a> Scanner<'t, 'a> {
    fn new(tokens: &'t [TaggedToken<'a>], preds: &'t [Predicate], root: usize) -> Self {
        let mut pred_at = vec![None; tokens.len()];
        let mut aux_of = vec![None; tokens.len()];
        for (k, p) in preds.iter().enumerate() {
            pred_at[p.index] = Some(k);
            for &a in &p.auxes {
                aux_of[a] = Some(p.index);
            }
        }
        Self {
            tokens,
            preds,
            pred_at,
            aux_of,
            arcs: Arcs { root, heads: vec![None; tokens.len()] },
            objects: vec![Vec::new(); tokens.len()],
            conj_pairs: Vec::new(),
            open_prep: None,
            pending: Vec::new(),
            current: None,
            last_nominal: None,
            pending_cc: None,
        }
    }

    fn root(&self) -> usize {
        self.arcs.root
    }

    fn subject_role(&self, head: usize) -> DepLabel {
        match self.pred_at[head] {
            Some(k) if self.preds[k].passive => DepLabel::Nsubjpass,
            _ => DepLabel::Nsubj,
        }
    }

    fn next_predicate(&self, i: usize) -> Option<&'t Predicate> {
        let preds: &'t [Predicate] = self.preds;
        preds.iter().find(|p| p.index > i)
    }

    /// First predicate after `i` reachable through adverbs, particles and auxiliaries only.
    fn upcoming_predicate(&self, i: usize) -> Option<usize> {
        let p = self.next_predicate(i)?;
        self.tokens[i + 1..p.index]
            .iter()
            .all(|t| matches!(t.pos, PosTag::Adv | PosTag::Part | PosTag::Aux))
            .then_some(p.index)
    }

    /// The predicate `i` immediately precedes as its subject ("cat chased", "January 5 was").
    fn direct_host(&self, i: usize) -> Option<usize> {
        let p = self.next_predicate(i)?;
        if !p.hosts_subject(i) {
            return None;
        }
        let gap_end = if p.start() > i { p.start() } else { p.index };
        self.tokens[i + 1..gap_end]
            .iter()
            .all(|t| matches!(t.pos, PosTag::Adv | PosTag::Part | PosTag::Num | PosTag::Aux))
            .then_some(p.index)
    }

    fn subject_host(&self, i: usize) -> Option<usize> {
        self.preds
            .iter()
            .filter(|p| p.index > i)
            .find(|p| p.hosts_subject(i))
            .map(|p| p.index)
    }

    fn premodifies(&self, i: usize) -> bool {
        match self.tokens.get(i + 1) {
            Some(next) => {
                self.pred_at[i + 1].is_none()
                    && matches!(next.pos, PosTag::Noun | PosTag::Propn | PosTag::Adj | PosTag::Num)
            }
            None => false,
        }
    }

    fn link_clauses(&mut self) {
        let tokens = self.tokens;
        let preds = self.preds;
        let root = self.root();

        for (k, p) in preds.iter().enumerate() {
            for (n, &a) in p.auxes.iter().enumerate() {
                let role = if p.passive && n + 1 == p.auxes.len() { DepLabel::Auxpass } else { DepLabel::Aux };
                self.arcs.attach(a, p.index, role);
            }

            match p.kind {
                ClauseKind::Infinitive { to } => self.arcs.attach(to, p.index, DepLabel::Aux),
                ClauseKind::Adverbial { mark } => self.arcs.attach(mark, p.index, DepLabel::Mark),
                ClauseKind::Relative { pronoun, .. } => {
                    let bare = tokens[pronoun + 1..p.start()]
                        .iter()
                        .all(|t| matches!(t.pos, PosTag::Adv | PosTag::Part));
                    if bare {
                        let role = self.subject_role(p.index);
                        self.arcs.attach(pronoun, p.index, role);
                    } else {
                        self.arcs.attach(pronoun, p.index, DepLabel::Dobj);
                        self.objects[p.index].push(pronoun);
                    }
                }
                _ => {}
            }

            if p.index == root {
                continue;
            }

            match p.kind {
                ClauseKind::Main => match preds[..k].iter().rev().find(|q| q.kind == ClauseKind::Main) {
                    Some(q) if has_cconj(tokens, q.index, p.start()) => {
                        self.arcs.attach(p.index, q.index, DepLabel::Conj);
                        self.conj_pairs.push((q.index, p.index));
                    }
                    Some(q) => self.arcs.attach(p.index, q.index, DepLabel::Ccomp),
                    None => self.arcs.attach(p.index, root, DepLabel::Ccomp),
                },
                ClauseKind::Adverbial { mark } => {
                    let governor = preds[..k].iter().rev().find(|q| q.index < mark);
                    match governor {
                        Some(q) if tokens[mark].is_any(COMPLEMENTIZERS) => {
                            self.arcs.attach(p.index, q.index, DepLabel::Ccomp)
                        }
                        _ => self.arcs.attach(p.index, root, DepLabel::Advcl),
                    }
                }
                ClauseKind::Infinitive { to } => match preds[..k].last() {
                    Some(q) => self.arcs.attach(p.index, q.index, DepLabel::Xcomp),
                    None if to > 0 && tokens[to - 1].pos.is_nominal() => {
                        self.arcs.attach(p.index, to - 1, DepLabel::Acl)
                    }
                    None => self.arcs.attach(p.index, root, DepLabel::Advcl),
                },
                ClauseKind::Relative { antecedent, .. } => self.arcs.attach(p.index, antecedent, DepLabel::Relcl),
                ClauseKind::PrepComplement { prep } => self.arcs.attach(p.index, prep, DepLabel::Pcomp),
                ClauseKind::Participle { noun } => self.arcs.attach(p.index, noun, DepLabel::Acl),
            }
        }
    }

    fn scan(&mut self) {
        let root = self.root();

        for i in 0..self.tokens.len() {
            if let Some(k) = self.pred_at[i] {
                self.current = Some(k);
                self.open_prep = None;
                self.pending.clear();
                self.last_nominal = None;
                continue;
            }
            if self.arcs.is_attached(i) {
                continue;
            }

            let token = self.tokens[i];
            match token.pos {
                PosTag::Punct => self.arcs.attach(i, root, DepLabel::Punct),
                PosTag::Cconj => self.pending_cc = Some(i),
                PosTag::Intj => self.arcs.attach(i, root, DepLabel::Intj),
                PosTag::Det => self.pending.push(i),
                PosTag::Adp => self.preposition(i),
                PosTag::Adv => self.adverb(i),
                PosTag::Part => self.particle(i),
                PosTag::Adj => self.adjective(i),
                PosTag::Num if self.premodifies(i) => self.pending.push(i),
                PosTag::Num if i > 0 && self.last_nominal == Some(i - 1) => {
                    self.arcs.attach(i, i - 1, DepLabel::Nummod)
                }
                PosTag::Pron if token.is("there") && self.current.is_none() => {
                    if let Some(p) = self.next_predicate(i) {
                        self.arcs.attach(i, p.index, DepLabel::Expl);
                    }
                }
                PosTag::Pron if token.is_any(POSSESSIVES) && self.premodifies(i) => self.pending.push(i),
                PosTag::Noun | PosTag::Propn | PosTag::Pron | PosTag::Num => self.nominal(i),
                _ => {}
            }
        }
    }

    fn modifier_role(&self, m: usize) -> DepLabel {
        let t = &self.tokens[m];
        match t.pos {
            PosTag::Det if t.is_any(POSSESSIVES) => DepLabel::Poss,
            PosTag::Det => DepLabel::Det,
            PosTag::Pron => DepLabel::Poss,
            PosTag::Adj => DepLabel::Amod,
            PosTag::Num => DepLabel::Nummod,
            PosTag::Noun | PosTag::Propn if is_possessive_form(t.text) => DepLabel::Poss,
            PosTag::Noun | PosTag::Propn => DepLabel::Compound,
            _ => DepLabel::Dep,
        }
    }

    fn nominal(&mut self, i: usize) {
        let token = self.tokens[i];

        if matches!(token.pos, PosTag::Noun | PosTag::Propn) && self.premodifies(i) {
            let next = self.tokens[i + 1].pos;
            if matches!(next, PosTag::Noun | PosTag::Propn) || is_possessive_form(token.text) {
                self.pending.push(i);
                return;
            }
        }

        let np_start = self.pending.first().copied().unwrap_or(i).min(i);
        for m in std::mem::take(&mut self.pending) {
            let role = self.modifier_role(m);
            self.arcs.attach(m, i, role);
        }

        if i != self.root() {
            self.govern(i, np_start);
        }
        self.last_nominal = Some(i);
    }

    /// Decides what a noun-phrase head depends on.
    fn govern(&mut self, i: usize, np_start: usize) {
        if let Some(prep) = self.open_prep.take() {
            self.arcs.attach(i, prep, DepLabel::Pobj);
            return;
        }

        let direct = self.direct_host(i);

        if let (Some(cc), Some(first)) = (self.pending_cc.take(), self.last_nominal) {
            if cc > first && direct.map_or(true, |p| self.arcs.head(first) == Some(p)) {
                self.arcs.attach(i, first, DepLabel::Conj);
                self.conj_pairs.push((first, i));
                return;
            }
        }

        if let Some(k) = self.current {
            let p = &self.preds[k];
            if p.embedded() && !p.copula && self.objects[p.index].is_empty() {
                self.object(i, k, np_start);
                return;
            }
        }

        if let Some(p) = direct {
            if !self.tokens[i].is_any(OBJECT_PRONOUNS) {
                let role = self.subject_role(p);
                self.arcs.attach(i, p, role);
                return;
            }
        }

        if let Some(n) = self.appositive_of(i, np_start) {
            self.arcs.attach(i, n, DepLabel::Appos);
            return;
        }

        if let Some(k) = self.current {
            self.object(i, k, np_start);
            return;
        }

        if let Some(p) = self.subject_host(i) {
            let role = self.subject_role(p);
            self.arcs.attach(i, p, role);
        }
    }

    /// "Paris, the capital, ..." and a trailing "..., my friend."
    fn appositive_of(&self, i: usize, np_start: usize) -> Option<usize> {
        let n = self.last_nominal?;
        if np_start == 0 || self.tokens[np_start - 1].text != "," || n + 1 >= np_start {
            return None;
        }
        if self.tokens[i + 1..].iter().any(|t| t.pos == PosTag::Cconj) {
            return None;
        }
        let preverbal = self.current.is_none() && self.arcs.role(n) != Some(DepLabel::Pobj);
        let trailing = !self.preds.iter().any(|p| p.index > i);
        (preverbal || trailing).then_some(n)
    }

    fn object(&mut self, i: usize, k: usize, np_start: usize) {
        let preds = self.preds;
        let p = &preds[k];
        let head = p.index;

        let role = match self.objects[head].last().copied() {
            None if p.copula => DepLabel::Attr,
            None => DepLabel::Dobj,
            Some(prev) if prev < np_start && self.tokens[prev + 1..np_start].iter().any(|t| t.text == ",") => {
                self.arcs.attach(i, prev, DepLabel::Conj);
                self.conj_pairs.push((prev, i));
                return;
            }
            Some(prev) if !p.copula && prev + 1 == np_start && self.arcs.role(prev) == Some(DepLabel::Dobj) => {
                // "gave the dog a bone"
                self.arcs.relink(prev, head, DepLabel::Dative);
                DepLabel::Dobj
            }
            Some(_) => DepLabel::Npadvmod,
        };
        self.arcs.attach(i, head, role);
        self.objects[head].push(i);
    }

    fn preposition(&mut self, i: usize) {
        let token = self.tokens[i];
        let preds = self.preds;
        self.open_prep = Some(i);

        if let Some(k) = self.current {
            if token.is("by") && preds[k].passive {
                self.arcs.attach(i, preds[k].index, DepLabel::Agent);
                return;
            }
        }

        let nominal_head = if token.is("of") {
            self.last_nominal
        } else {
            self.last_nominal.filter(|n| self.current.is_none() && n + 1 == i)
        };

        let head = nominal_head
            .or_else(|| self.current.map(|k| preds[k].index))
            .or_else(|| self.next_predicate(i).map(|p| p.index))
            .or(self.last_nominal)
            .unwrap_or(self.root());
        self.arcs.attach(i, head, DepLabel::Prep);
    }

    fn adverb(&mut self, i: usize) {
        let token = self.tokens[i];
        let preds = self.preds;

        if token.is_any(NEGATIONS) {
            self.negation(i);
            return;
        }
        if token.is_any(PARTICLES) && i > 0 && self.current.map(|k| preds[k].index) == Some(i - 1) {
            self.arcs.attach(i, i - 1, DepLabel::Prt);
            return;
        }
        if let Some(next) = self.tokens.get(i + 1) {
            if matches!(next.pos, PosTag::Adj | PosTag::Adv) && self.pred_at[i + 1].is_none() {
                self.arcs.attach(i, i + 1, DepLabel::Advmod);
                return;
            }
        }

        let head = self
            .upcoming_predicate(i)
            .or_else(|| self.current.map(|k| preds[k].index))
            .or_else(|| self.next_predicate(i).map(|p| p.index));
        if let Some(head) = head {
            self.arcs.attach(i, head, DepLabel::Advmod);
        }
    }

    fn negation(&mut self, i: usize) {
        let preds = self.preds;
        let head = i
            .checked_sub(1)
            .and_then(|j| self.aux_of[j].or_else(|| self.pred_at[j].map(|k| preds[k].index)))
            .or_else(|| self.upcoming_predicate(i))
            .or_else(|| self.current.map(|k| preds[k].index))
            .unwrap_or(self.root());
        self.arcs.attach(i, head, DepLabel::Neg);
    }

    fn particle(&mut self, i: usize) {
        let token = self.tokens[i];
        if token.is_any(NEGATIONS) {
            self.negation(i);
        } else if is_possessive_form(token.text) && i > 0 && self.tokens[i - 1].pos.is_nominal() {
            self.arcs.attach(i, i - 1, DepLabel::Case);
        }
    }

    fn adjective(&mut self, i: usize) {
        if self.premodifies(i) {
            self.pending.push(i);
            return;
        }
        if let Some(k) = self.current {
            let p = &self.preds[k];
            let role = if p.copula || self.objects[p.index].is_empty() { DepLabel::Acomp } else { DepLabel::Oprd };
            self.arcs.attach(i, p.index, role);
            return;
        }
        if let Some(n) = self.last_nominal {
            self.arcs.attach(i, n, DepLabel::Amod);
        }
    }

    fn finish(mut self) -> SyntaxTree {
        let root = self.root();
        let n = self.tokens.len();

        for i in 0..n {
            if self.tokens[i].pos == PosTag::Cconj {
                let head = self
                    .conj_pairs
                    .iter()
                    .find(|(a, b)| *a < i && i < *b)
                    .map(|(a, _)| *a)
                    .unwrap_or(root);
                self.arcs.attach(i, head, DepLabel::Cc);
            }
        }

        for i in 0..n {
            self.arcs.attach(i, root, DepLabel::Dep);
        }

        for i in 0..n {
            if i != root && !self.arcs.reaches_root(i) {
                self.arcs.relink(i, root, DepLabel::Dep);
            }
        }

        let deps = self
            .arcs
            .heads
            .iter()
            .enumerate()
            .filter_map(|(i, arc)| {
                arc.map(|(head_index, role)| Dependency { head_index, dependent_index: i, role })
            })
            .collect();

        SyntaxTree { root: Some(root), deps }
    }
}

/// Parses one tagged sentence. Every token except the root receives exactly one head.
pub fn parse_greedy(tokens: &[TaggedToken]) -> SyntaxTree {
    if tokens.is_empty() {
        return SyntaxTree::default();
    }

    let preds = find_predicates(tokens);
    let root = pick_root(tokens, &preds);

    let mut scanner = Scanner::new(tokens, &preds, root);
    scanner.link_clauses();
    scanner.scan();
    scanner.finish()
}
