use super::{EventOutcome, ShutdownReason, VodnavOrchestrator};
use crate::events::VodnavEvent;
use crate::view::ViewModel;
use tracing::{debug, info};

impl VodnavOrchestrator {
    /// Apply one event to completion and publish the resulting view.
    ///
    /// Navigation requests go through the [`crate::navigation::Navigator`];
    /// status pushes only write their own slot and never touch navigation.
    pub fn handle_event(&mut self, event: VodnavEvent) -> EventOutcome {
        self.metrics.record_event(&event);
        debug!("Handling event: {}", event.description());

        match event {
            VodnavEvent::CategoryRequested { category } => {
                self.navigator.change_category(category, &self.index);
            }
            VodnavEvent::PageRequested { page } => {
                self.navigator.change_page(page);
            }
            VodnavEvent::VideoSelected { video_name } => {
                self.navigator.select_video(&video_name, &self.index);
            }
            VodnavEvent::SelectionStepped { delta } => {
                self.navigator.step_selection(delta, &self.index);
            }
            VodnavEvent::FilterChanged { query } => {
                self.navigator.set_filter_query(query);
            }
            VodnavEvent::ShowMoreRequested => {
                self.navigator
                    .show_more_videos(self.config.navigation.videos_per_page);
            }
            VodnavEvent::RecorderStatusChanged { status, error } => {
                self.status_sources.set_recorder_status(status, error);
            }
            VodnavEvent::MicStatusChanged { status } => {
                self.status_sources.set_mic_status(status);
            }
            VodnavEvent::CrashReported { crash } => {
                self.status_sources.push_crash(crash);
            }
            VodnavEvent::CrashesCleared => {
                self.status_sources.clear_crashes();
            }
            VodnavEvent::SaveStatusChanged { status } => {
                self.status_sources.set_save_status(status);
            }
            VodnavEvent::UpgradeStatusChanged { status } => {
                self.status_sources.set_upgrade_status(status);
            }
            VodnavEvent::VersionDisplayUpdated { raw } => {
                self.status_sources.update_version_display(&raw);
            }
            VodnavEvent::VideoIndexRefreshed { index } => {
                info!("Video index refreshed: {} videos", index.len());
                self.navigator.reconcile_index(&index);
                self.index = index;
            }
            VodnavEvent::ShutdownRequested { reason, .. } => {
                return EventOutcome::Shutdown(ShutdownReason::UserRequest(reason));
            }
        }

        self.publish_view();
        EventOutcome::Continue
    }

    /// Recompose the view from the current snapshot, index and statuses
    pub(super) fn publish_view(&self) {
        let view = ViewModel::compose(
            self.navigator.snapshot(),
            &self.index,
            self.status.snapshot(),
        );
        debug!("{}", view.summary());
        self.view_sender.send_replace(view);
    }
}
