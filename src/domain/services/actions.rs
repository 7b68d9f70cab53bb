#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::TransportBox;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /chip (/c) [CHIP_NUMBER] - Clicks the numbered suggestion chip under the latest reply.
- /reset (/r) - Forgets the current conversation and starts over with a fresh greeting.
- /theme (/t) - Switches between the light and dark theme.
- /quit /exit (/q) - Exit Tablebook.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+T - Switch theme.
- ALT+1 to ALT+9 - Click the chip with that number.
- CTRL+C - Exit.

CHIPS:
Replies from the booking service may come with numbered chips. Cuisine and area chips marked with [ ] can be picked several times before submitting them with their Done chip. Every other chip is sent right away.
        "#;

    return text.trim().to_string();
}

pub struct ActionsService {}

impl ActionsService {
    /// Forwards requests to the booking service one at a time and posts every
    /// outcome back to the UI. Returns once the UI drops its sender.
    pub async fn start(
        transport: TransportBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = match rx.recv().await {
                Some(action) => action,
                None => return Ok(()),
            };

            match action {
                Action::BackendRequest(request) => {
                    let res = transport.send(request).await;
                    if let Err(err) = &res {
                        tracing::warn!(error = %err, "Booking service request failed");
                    }

                    tx.send(Event::BackendResponse(res))?;
                }
            }
        }
    }
}
