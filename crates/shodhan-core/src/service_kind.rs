//! Booking flows offered by the clinic.
//!
//! Each [`ServiceKind`] maps to one row of [`ServiceProfile`] describing how
//! its booking dialog looks and what it submits.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_input;
use crate::validation::{
    DATE_FORMAT, validate_date_on, validate_description, validate_name, validate_phone,
};

/// The closed set of bookable service kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    ClinicAppointment,
    Panchakarma,
    CallConsultation,
}

/// How a booking form treats its description field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionRule {
    Required,
    Optional,
    /// Not asked for; this text is always submitted.
    Fixed(&'static str),
}

impl DescriptionRule {
    pub fn is_collected(self) -> bool {
        !matches!(self, Self::Fixed(_))
    }
}

/// Static presentation and submission rules for a [`ServiceKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceProfile {
    /// Name the backend knows the service by.
    pub service_name: &'static str,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub description: DescriptionRule,
    /// Whether the user picks the date. Otherwise the booking is for today.
    pub collects_date: bool,
    pub success_message: &'static str,
}

static PROFILES: [(ServiceKind, ServiceProfile); 3] = [
    (
        ServiceKind::ClinicAppointment,
        ServiceProfile {
            service_name: "Clinic Appointment",
            title: "Book Appointment",
            submit_label: "Book Appointment",
            description: DescriptionRule::Optional,
            collects_date: true,
            success_message: "Your appointment has been booked successfully!",
        },
    ),
    (
        ServiceKind::Panchakarma,
        ServiceProfile {
            service_name: "Panchakarma",
            title: "Book Slot",
            submit_label: "Book Panchakarma Slot",
            description: DescriptionRule::Fixed("Panchakarma treatment booking"),
            collects_date: false,
            success_message: "Your Panchakarma slot has been booked successfully! We will contact you soon.",
        },
    ),
    (
        ServiceKind::CallConsultation,
        ServiceProfile {
            service_name: "Call Consultation",
            title: "Request a Call",
            submit_label: "Request Call",
            description: DescriptionRule::Required,
            collects_date: false,
            success_message: "Your call consultation request has been submitted successfully! We will contact you soon.",
        },
    ),
];

impl ServiceKind {
    pub const ALL: [Self; 3] = [
        Self::ClinicAppointment,
        Self::Panchakarma,
        Self::CallConsultation,
    ];

    pub fn profile(self) -> &'static ServiceProfile {
        PROFILES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, profile)| profile)
            .unwrap_or(&PROFILES[0].1)
    }

    /// Resolve the kind from a backend service name.
    pub fn from_service_name(name: &str) -> Option<Self> {
        PROFILES
            .iter()
            .find(|(_, profile)| profile.service_name.eq_ignore_ascii_case(name.trim()))
            .map(|(kind, _)| *kind)
    }

    /// Validate a booking form and build the request to submit.
    ///
    /// Kinds that do not collect a date book for `today`; the clinic flow
    /// requires a date within the booking window.
    pub fn prepare_appointment(
        self,
        form: &AppointmentForm,
        today: NaiveDate,
    ) -> Result<AppointmentRequest, BTreeMap<&'static str, String>> {
        let profile = self.profile();
        let name = sanitize_input(&form.name);
        let phone = sanitize_input(&form.phone);
        let description = sanitize_input(&form.description);
        let date = sanitize_input(&form.date);

        let mut errors = BTreeMap::new();
        let mut check = |field: &'static str, message: String| {
            if !message.is_empty() {
                errors.insert(field, message);
            }
        };
        check("name", validate_name(&name));
        check("phone", validate_phone(&phone));
        if profile.description.is_collected() {
            let required = profile.description == DescriptionRule::Required;
            check("description", validate_description(&description, required));
        }
        if profile.collects_date {
            check("date", validate_date_on(&date, today));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let description = match profile.description {
            DescriptionRule::Fixed(fixed) => Some(fixed.to_string()),
            _ => Some(description).filter(|d| !d.is_empty()),
        };
        let date = if profile.collects_date {
            date
        } else {
            today.format(DATE_FORMAT).to_string()
        };

        Ok(AppointmentRequest {
            name: name.trim().to_string(),
            phone,
            description,
            date: Some(date),
            service_name: profile.service_name.to_string(),
        })
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            Self::ClinicAppointment => "clinic-appointment",
            Self::Panchakarma => "panchakarma",
            Self::CallConsultation => "call-consultation",
        };
        f.write_str(slug)
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .or_else(|| Self::from_service_name(s))
            .ok_or_else(|| format!("unknown service kind: {s}"))
    }
}

/// Raw booking form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub name: String,
    pub phone: String,
    pub description: String,
    pub date: String,
}

/// Appointment request accepted by `POST /api/appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub service_name: String,
}
