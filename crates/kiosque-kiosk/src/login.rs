use std::io::Write;

use tokio::io::{AsyncBufRead, Lines};
use tracing::info;

use kiosque_core::models::session::SessionContext;

use crate::config::KiosqueConfig;
use crate::screen::{LOGIN_INCOMPLETE, LOGIN_TITLE};

/// Ask for the operator and health center until both are given.
///
/// The configured health center is offered as the default. Returns
/// `None` if input closes first.
pub async fn login<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    config: &KiosqueConfig,
) -> eyre::Result<Option<SessionContext>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        writeln!(out, "\n{LOGIN_TITLE}")?;
        write!(out, "Nom de l'agent : ")?;
        out.flush()?;
        let Some(nurse_name) = lines.next_line().await? else {
            return Ok(None);
        };

        if config.health_center.is_empty() {
            write!(out, "Centre de santé : ")?;
        } else {
            write!(out, "Centre de santé [{}] : ", config.health_center)?;
        }
        out.flush()?;
        let Some(typed_center) = lines.next_line().await? else {
            return Ok(None);
        };
        let health_center = if typed_center.trim().is_empty() {
            config.health_center.clone()
        } else {
            typed_center
        };

        match SessionContext::new(nurse_name, health_center, config.robot_id.as_str()) {
            Ok(session) => {
                info!(
                    nurse = %session.nurse_name,
                    health_center = %session.health_center,
                    robot_id = %session.robot_id,
                    "operator logged in"
                );
                return Ok(Some(session));
            }
            Err(_) => writeln!(out, "{LOGIN_INCOMPLETE}")?,
        }
    }
}
