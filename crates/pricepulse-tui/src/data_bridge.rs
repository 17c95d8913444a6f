//! Data bridge — forwards store snapshots into the TUI action loop.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use pricepulse_core::{HomeSnapshot, SearchSnapshot, SnapshotStream};

use crate::action::Action;

/// Push the current snapshots, then every later one, until cancelled or
/// both stores are gone.
pub async fn spawn_data_bridge(
    mut home: SnapshotStream<HomeSnapshot>,
    mut search: SnapshotStream<SearchSnapshot>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let _ = action_tx.send(Action::HomeUpdated(home.current().clone()));
    let _ = action_tx.send(Action::SearchUpdated(search.current().clone()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snap) = home.changed() => {
                debug!(screen = ?snap.screen, loading = snap.is_loading, "dispatching HomeUpdated");
                if action_tx.send(Action::HomeUpdated(snap)).is_err() {
                    break;
                }
            }
            Some(snap) = search.changed() => {
                debug!(loading = snap.is_loading, results = snap.results.len(), "dispatching SearchUpdated");
                if action_tx.send(Action::SearchUpdated(snap)).is_err() {
                    break;
                }
            }
            else => break,
        }
    }

    debug!("data bridge shut down");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use pricepulse_core::{
        ClientConfig, HomeStore, LiveCatalog, Screen, SearchIntent, SearchProvider, SearchStore,
    };
    use url::Url;

    use super::*;

    fn home_store() -> HomeStore<LiveCatalog> {
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:9/").unwrap());
        HomeStore::new(LiveCatalog::new(&config).unwrap())
    }

    #[tokio::test]
    async fn forwards_initial_and_changed_snapshots() {
        let home = home_store();
        let search = SearchStore::new(SearchProvider::Demo);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let bridge = tokio::spawn(spawn_data_bridge(
            home.subscribe(),
            search.subscribe(),
            tx,
            cancel.clone(),
        ));

        assert!(matches!(rx.recv().await, Some(Action::HomeUpdated(s)) if s.screen == Screen::Login));
        assert!(matches!(rx.recv().await, Some(Action::SearchUpdated(s)) if s.results.is_empty()));

        home.navigate(Screen::Register);
        match rx.recv().await {
            Some(Action::HomeUpdated(snap)) => assert_eq!(snap.screen, Screen::Register),
            other => panic!("expected HomeUpdated, got {other:?}"),
        }

        search.dispatch(SearchIntent::SetQuery("tv".into()));
        match rx.recv().await {
            Some(Action::SearchUpdated(snap)) => assert_eq!(snap.query, "tv"),
            other => panic!("expected SearchUpdated, got {other:?}"),
        }

        cancel.cancel();
        assert!(bridge.await.is_ok());
    }
}
