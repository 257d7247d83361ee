/// File circulaire à curseur : une séquence figée et l'indice du prochain
/// élément à examiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationCycle<T> {
    members: Vec<T>,
    cursor: usize,
}

impl<T: Clone> RotationCycle<T> {
    pub fn new(members: Vec<T>) -> Self {
        Self { members, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Examine au plus un tour complet à partir du curseur. Le curseur avance
    /// d'une position par élément examiné, qu'il convienne ou non ; le premier
    /// élément satisfaisant `predicate` est renvoyé.
    pub fn advance_until<F>(&mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let total = self.members.len();
        (0..total).find_map(|_| {
            let index = self.cursor;
            self.cursor = (index + 1) % total;
            let candidate = &self.members[index];
            predicate(candidate).then(|| candidate.clone())
        })
    }
}
