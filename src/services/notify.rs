use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;

use crate::models::transaction::{ActionKind, ActionState, AlertModal};

/// Open WebSocket senders, keyed by viewer.
pub type ConnectionMap = Arc<RwLock<HashMap<String, Vec<mpsc::UnboundedSender<String>>>>>;

pub fn new_connection_map() -> ConnectionMap {
    Arc::new(RwLock::new(HashMap::new()))
}

pub fn register(conn_map: &ConnectionMap, viewer: &str, sender: mpsc::UnboundedSender<String>) {
    if let Ok(mut map) = conn_map.write() {
        map.entry(viewer.to_string()).or_default().push(sender);
    }
}

/// Drop closed senders for `viewer`.
pub fn prune(conn_map: &ConnectionMap, viewer: &str) {
    if let Ok(mut map) = conn_map.write() {
        if let Some(senders) = map.get_mut(viewer) {
            senders.retain(|s| !s.is_closed());
            if senders.is_empty() {
                map.remove(viewer);
            }
        }
    }
}

/// Tell a viewer's open pages that an action changed state.
pub fn notify_action(
    conn_map: &ConnectionMap,
    viewer: &str,
    proposal_id: &str,
    kind: ActionKind,
    state: ActionState,
    alert: Option<&AlertModal>,
) {
    let map = match conn_map.read() {
        Ok(m) => m,
        Err(_) => return,
    };
    let Some(senders) = map.get(viewer) else {
        return;
    };
    let msg = serde_json::json!({
        "type": "action_update",
        "proposal_id": proposal_id,
        "action": kind,
        "state": state,
        "alert": alert,
    });
    let msg_str = msg.to_string();
    for sender in senders {
        let _ = sender.send(msg_str.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_registered_viewer_only() {
        let map = new_connection_map();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (other_tx, mut other_rx) = mpsc::unbounded_channel();
        register(&map, "alice", tx);
        register(&map, "bob", other_tx);

        notify_action(&map, "alice", "7", ActionKind::Queue, ActionState::Pending, None);

        let msg: serde_json::Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(msg["type"], "action_update");
        assert_eq!(msg["proposal_id"], "7");
        assert_eq!(msg["action"], "queue");
        assert_eq!(msg["state"], "pending");
        assert!(other_rx.try_recv().is_err());
    }

    #[test]
    fn prune_removes_closed_senders() {
        let map = new_connection_map();
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        register(&map, "alice", tx);
        drop(rx);
        prune(&map, "alice");
        assert!(map.read().unwrap().get("alice").is_none());
    }
}
