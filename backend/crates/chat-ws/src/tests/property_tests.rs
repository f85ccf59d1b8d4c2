use crate::{ConnectionId, SessionRegistry};

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Op {
    Insert { session: usize, conn: usize },
    Remove { session: usize, conn: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize, 0..8usize).prop_map(|(session, conn)| Op::Insert { session, conn }),
        (0..4usize, 0..8usize).prop_map(|(session, conn)| Op::Remove { session, conn }),
    ]
}

proptest! {
    #[test]
    fn given_random_operations_when_applied_then_registry_matches_model(ops in prop::collection::vec(op(), 0..64)) {
        let sessions: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let conns: Vec<ConnectionId> = (0..8).map(|_| ConnectionId::random()).collect();

        let mut registry = SessionRegistry::new();
        let mut model: HashMap<Uuid, HashSet<ConnectionId>> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert { session, conn } => {
                    let expected = model.entry(sessions[session]).or_default().insert(conns[conn]);
                    prop_assert_eq!(registry.insert(sessions[session], conns[conn]), expected);
                }
                Op::Remove { session, conn } => {
                    let expected = model
                        .get_mut(&sessions[session])
                        .is_some_and(|members| members.remove(&conns[conn]));
                    model.retain(|_, members| !members.is_empty());
                    prop_assert_eq!(registry.remove(sessions[session], conns[conn]), expected);
                }
            }
        }

        // No empty session entries survive
        prop_assert_eq!(registry.session_count(), model.len());
        for session in &sessions {
            let expected = model.get(session).map_or(0, HashSet::len);
            prop_assert_eq!(registry.session_size(*session), expected);
            let members: HashSet<ConnectionId> = registry.members(*session).into_iter().collect();
            prop_assert_eq!(members, model.get(session).cloned().unwrap_or_default());
        }
    }
}
