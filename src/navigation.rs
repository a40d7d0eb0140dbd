use std::{future::IntoFuture, pin::Pin};

use crate::{AssetId, Error, Event, EventSink, Hotspot, SceneControl};

/// The state of [`NavigationCoordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    /// No navigation in progress.
    Idle,

    /// Visibility and selection were switched, waiting for their notifications to settle before
    /// starting playback.
    Switching { ticket: u64, target: AssetId },
}

/// A handle to a navigation in progress.
///
/// It resolves to the target asset once playback was started. If the navigation is superseded
/// by a newer one, it resolves to [`Error::NavigationOneShotReceive`].
#[derive(Debug)]
pub struct NavigationTicket {
    ticket: u64,
    target: AssetId,
    receiver: oneshot::Receiver<AssetId>,
}

impl NavigationTicket {
    /// Get the ticket number.
    pub fn id(&self) -> u64 {
        self.ticket
    }

    /// Get the target asset.
    pub fn target(&self) -> AssetId {
        self.target
    }

    /// Check whether playback was started without blocking.
    ///
    /// Returns [`None`] if the navigation is still settling.
    pub fn try_wait(&self) -> Option<Result<AssetId, Error>> {
        match self.receiver.try_recv() {
            Ok(target) => Some(Ok(target)),
            Err(oneshot::TryRecvError::Empty) => None,
            Err(oneshot::TryRecvError::Disconnected) => Some(Err(oneshot::RecvError.into())),
        }
    }

    /// Block until playback was started.
    pub fn wait(self) -> Result<AssetId, Error> {
        Ok(self.receiver.recv()?)
    }
}

impl IntoFuture for NavigationTicket {
    type Output = Result<AssetId, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { Ok(self.receiver.await?) })
    }
}

/// The coordinator navigating between assets when a hotspot is clicked.
///
/// A navigation shows only the target asset, selects it, and starts playback once every
/// visibility and selection notification was delivered. The ordering relies on the
/// [`Event::NavigationSettled`] marker being queued behind those notifications.
#[derive(Debug)]
pub struct NavigationCoordinator {
    state: NavigationState,
    next_ticket: u64,
    pending: Option<oneshot::Sender<AssetId>>,
}

impl NavigationCoordinator {
    /// Create a new idle coordinator.
    pub fn new() -> Self {
        Self {
            state: NavigationState::Idle,
            next_ticket: 0,
            pending: None,
        }
    }

    /// Get the state.
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Handle a hotspot click.
    ///
    /// If the hotspot has no target, or the target cannot be found, this is logged and the scene
    /// is left untouched.
    pub fn on_hotspot_clicked(
        &mut self,
        scene: &mut impl SceneControl,
        sink: &mut impl EventSink,
        hotspot: &Hotspot,
    ) -> Result<NavigationTicket, Error> {
        let Some(target_name) = hotspot.target_splat_name.as_deref() else {
            log::info!("Hotspot \"{}\" has no navigation target", hotspot.name);
            return Err(Error::NavigationTargetUnset(hotspot.name.clone()));
        };

        let Some(target) = scene.asset_by_name(target_name) else {
            log::error!(
                "Navigation from hotspot \"{}\" failed: splat \"{target_name}\" not found",
                hotspot.name
            );
            return Err(Error::NavigationTargetNotFound(target_name.to_owned()));
        };

        if let NavigationState::Switching { ticket, .. } = self.state {
            log::debug!("Navigation {ticket} superseded");
        }

        log::debug!(
            "Navigating from hotspot \"{}\" to splat \"{}\"",
            hotspot.name,
            target.name
        );

        for asset in scene.assets() {
            scene.set_asset_visible(asset.id, asset.id == target.id);
            sink.emit(Event::AssetVisibilityChanged(asset.id));
        }

        scene.set_selection(Some(target.id));
        sink.emit(Event::SelectionChanged(Some(target.id)));

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        sink.emit(Event::NavigationSettled { ticket });

        let (sender, receiver) = oneshot::channel();
        self.pending = Some(sender);
        self.state = NavigationState::Switching {
            ticket,
            target: target.id,
        };

        Ok(NavigationTicket {
            ticket,
            target: target.id,
            receiver,
        })
    }

    /// Handle the settle marker of a navigation, starting playback.
    ///
    /// Returns `false` if the ticket is not the current navigation.
    pub fn on_settled(&mut self, sink: &mut impl EventSink, ticket: u64) -> bool {
        let NavigationState::Switching {
            ticket: current,
            target,
        } = self.state
        else {
            log::debug!("Ignoring settle of navigation {ticket} while idle");
            return false;
        };

        if current != ticket {
            log::debug!("Ignoring settle of stale navigation {ticket}");
            return false;
        }

        self.state = NavigationState::Idle;
        sink.emit(Event::StartPlayback);
        log::info!("Navigation {ticket} to asset {target:?} settled, playback started");

        if let Some(sender) = self.pending.take() {
            if sender.send(target).is_err() {
                log::debug!("Navigation {ticket} ticket was dropped");
            }
        }

        true
    }
}

impl Default for NavigationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
