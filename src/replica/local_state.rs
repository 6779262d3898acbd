use crate::replica::peers::ReplicaId;
use std::fmt;

#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Default)]
pub struct Term(u64);

impl Term {
    pub fn new(term: u64) -> Self {
        Term(term)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn incr(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Term and vote live in memory only. A restarted process begins again at term 0.
pub(crate) struct VolatileLocalState {
    current_term: Term,
    voted_for_this_term: Option<ReplicaId>,
    my_replica_id: ReplicaId,
}

impl VolatileLocalState {
    pub(crate) fn new(my_replica_id: ReplicaId) -> Self {
        VolatileLocalState {
            current_term: Term::new(0),
            voted_for_this_term: None,
            my_replica_id,
        }
    }

    /// Set current term to `new_term` iff it is larger than current term. Returns true if we
    /// mutated state.
    pub(crate) fn store_term_if_increased(&mut self, new_term: Term) -> bool {
        if new_term <= self.current_term {
            false
        } else {
            self.current_term = new_term;
            self.voted_for_this_term = None;
            true
        }
    }

    /// Used when transitioning to candidate and when taking leadership without an election.
    pub(crate) fn increment_term_and_vote_for_self(&mut self) -> Term {
        self.current_term.incr();
        self.voted_for_this_term.replace(self.my_replica_id);

        self.current_term
    }

    /// Used by a leader handing off leadership. The handoff target is not voted for.
    pub(crate) fn increment_term(&mut self) -> Term {
        self.current_term.incr();
        self.voted_for_this_term = None;

        self.current_term
    }

    pub(crate) fn current_term(&self) -> Term {
        self.current_term
    }

    pub(crate) fn voted_for_current_term(&self) -> (Term, Option<ReplicaId>) {
        (self.current_term, self.voted_for_this_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_only_moves_forward() {
        let mut state = VolatileLocalState::new(ReplicaId::new(1));
        assert!(state.store_term_if_increased(Term::new(3)));
        assert!(!state.store_term_if_increased(Term::new(3)));
        assert!(!state.store_term_if_increased(Term::new(2)));
        assert_eq!(state.current_term(), Term::new(3));
    }

    #[test]
    fn vote_is_cleared_on_new_term() {
        let mut state = VolatileLocalState::new(ReplicaId::new(7));
        assert_eq!(state.increment_term_and_vote_for_self(), Term::new(1));
        assert_eq!(state.voted_for_current_term(), (Term::new(1), Some(ReplicaId::new(7))));

        state.store_term_if_increased(Term::new(4));
        assert_eq!(state.voted_for_current_term(), (Term::new(4), None));

        state.increment_term_and_vote_for_self();
        assert_eq!(state.increment_term(), Term::new(6));
        assert_eq!(state.voted_for_current_term(), (Term::new(6), None));
    }
}
