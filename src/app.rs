//! Lucky 9 window: drives a `SlotMachine` from iced's update loop

use std::time::{Duration, Instant};

use iced::{Element, Subscription, Task};

use l9_core::Millis;
use l9_gui::{slot_machine_view, SlotMessage};
use l9_slot::SlotMachine;

/// Frame interval while reels are moving (~60fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Main application state
pub struct LuckyNine {
    machine: SlotMachine,
    /// Wall-clock origin of the machine's virtual time
    epoch: Instant,
    /// Virtual time of the last frame, for the light animation
    frame_ms: Millis,
}

impl LuckyNine {
    pub fn new(machine: SlotMachine) -> Self {
        Self {
            machine,
            epoch: Instant::now(),
            frame_ms: 0,
        }
    }

    fn elapsed_ms(&self, now: Instant) -> Millis {
        now.saturating_duration_since(self.epoch).as_millis() as Millis
    }

    pub fn subscription(&self) -> Subscription<SlotMessage> {
        // Idle machines have nothing to animate
        if self.machine.is_spinning() {
            iced::time::every(FRAME_INTERVAL).map(SlotMessage::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn update(&mut self, message: SlotMessage) -> Task<SlotMessage> {
        match message {
            SlotMessage::Spin(mode) => {
                // Catch the clock up so delays count from the click
                let now = self.elapsed_ms(Instant::now());
                self.machine.advance_to(now);
                self.frame_ms = now;

                if !self.machine.spin_with(mode) {
                    log::debug!("Spin button ignored: {}", mode);
                }
            }

            SlotMessage::Tick(instant) => {
                let now = self.elapsed_ms(instant);
                self.frame_ms = now;

                for event in self.machine.advance_to(now) {
                    log::debug!("{} at {}ms", event.type_name(), event.timestamp_ms);
                }
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, SlotMessage> {
        let animation_ms = self
            .machine
            .session()
            .map_or(0, |session| self.frame_ms.saturating_sub(session.started_at_ms));
        slot_machine_view(&self.machine, animation_ms)
    }
}

impl Drop for LuckyNine {
    fn drop(&mut self) {
        self.machine.shutdown();
    }
}
