//! Appointment booking for the clinic's three service kinds.

use std::io::Write;

use shodhan_client::{ApiError, Lookup};
use shodhan_core::service_kind::{AppointmentForm, ServiceKind};
use tracing::info;

use crate::app::App;
use crate::banner::{Banner, Classify};

#[derive(clap::Args, Debug)]
pub struct BookArgs {
    /// clinic-appointment, panchakarma or call-consultation.
    pub kind: ServiceKind,
    /// Patient name.
    #[arg(short, long)]
    pub name: String,
    /// 10-digit mobile number; a +91 prefix is accepted.
    #[arg(short, long)]
    pub phone: String,
    /// Health concern. Required for call consultations, ignored for Panchakarma.
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// Preferred date as YYYY-MM-DD (clinic appointments only).
    #[arg(long, default_value = "")]
    pub date: String,
}

/// Validate the form, then submit it. Nothing is sent when validation fails.
pub async fn run(app: &App, w: &mut impl Write, args: BookArgs) -> anyhow::Result<()> {
    let kind = args.kind;
    let profile = kind.profile();
    let form = AppointmentForm {
        name: args.name,
        phone: args.phone,
        description: args.description,
        date: args.date,
    };

    let request = kind
        .prepare_appointment(&form, App::today())
        .map_err(|errors| Banner::validation(&errors))?;

    app.public
        .book_appointment(&request)
        .await
        .classify_with(|e| booking_failure_message(kind, e))?;

    info!(service = %request.service_name, "Booking submitted");
    writeln!(w, "{}", profile.success_message)?;
    Ok(())
}

fn booking_failure_message(kind: ServiceKind, err: &ApiError) -> String {
    if kind == ServiceKind::ClinicAppointment {
        return match err {
            ApiError::Network(_) => err.user_message(&Lookup::list("appointment")),
            _ => "Failed to submit appointment. Please try again.".into(),
        };
    }

    match err.status() {
        Some(404) => {
            "Service temporarily unavailable. Please try again later or call us directly.".into()
        }
        Some(500..) => "Server error. Please try again in a few minutes.".into(),
        _ => {
            let detail = match err {
                ApiError::Status {
                    message: Some(message),
                    ..
                } => message.clone(),
                other => other.to_string(),
            };
            let prefix = match kind {
                ServiceKind::Panchakarma => "Failed to book your slot",
                _ => "Failed to submit your request",
            };
            format!("{prefix}: {detail}. Please try again.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, message: Option<&str>) -> ApiError {
        ApiError::Status {
            status,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn clinic_failures_are_generic() {
        assert_eq!(
            booking_failure_message(ServiceKind::ClinicAppointment, &status(500, None)),
            "Failed to submit appointment. Please try again."
        );
    }

    #[test]
    fn quick_bookings_distinguish_status() {
        assert!(
            booking_failure_message(ServiceKind::Panchakarma, &status(404, None))
                .starts_with("Service temporarily unavailable")
        );
        assert_eq!(
            booking_failure_message(ServiceKind::CallConsultation, &status(503, None)),
            "Server error. Please try again in a few minutes."
        );
        assert_eq!(
            booking_failure_message(ServiceKind::Panchakarma, &status(409, Some("Slot taken"))),
            "Failed to book your slot: Slot taken. Please try again."
        );
        assert_eq!(
            booking_failure_message(
                ServiceKind::CallConsultation,
                &status(400, Some("Bad phone"))
            ),
            "Failed to submit your request: Bad phone. Please try again."
        );
    }
}
