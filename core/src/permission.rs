//! Permission-status classification for the picker collaborator.
//!
//! # Design
//! The host reports the OS authorization status as a raw integer. These
//! functions classify it totally: unrecognized values map to `Unknown` and
//! are directed to the settings alert, the conservative deny. The core never
//! aborts on a platform value it has not seen before.

/// OS-reported authorization status for a capture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    NotDetermined,
    Restricted,
    Denied,
    Authorized,
    Limited,
    /// A raw value outside the known set, carried for diagnostics.
    Unknown(i32),
}

/// What the picker collaborator should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerDirective {
    /// Prompt the user for access, then re-check.
    RequestAccess,
    /// Access is granted; present the picker.
    PresentPicker,
    /// Access is blocked; direct the user to system settings.
    ShowSettingsAlert,
}

impl PermissionStatus {
    /// Classify a raw photo-library authorization value.
    pub fn from_photo_library_raw(raw: i32) -> Self {
        match raw {
            0 => PermissionStatus::NotDetermined,
            1 => PermissionStatus::Restricted,
            2 => PermissionStatus::Denied,
            3 => PermissionStatus::Authorized,
            4 => PermissionStatus::Limited,
            other => PermissionStatus::Unknown(other),
        }
    }

    /// Classify a raw camera authorization value. The camera status set has
    /// no limited-access case.
    pub fn from_camera_raw(raw: i32) -> Self {
        match raw {
            0 => PermissionStatus::NotDetermined,
            1 => PermissionStatus::Restricted,
            2 => PermissionStatus::Denied,
            3 => PermissionStatus::Authorized,
            other => PermissionStatus::Unknown(other),
        }
    }

    /// The next step for the picker collaborator given this status.
    pub fn directive(self) -> PickerDirective {
        match self {
            PermissionStatus::NotDetermined => PickerDirective::RequestAccess,
            PermissionStatus::Authorized | PermissionStatus::Limited => {
                PickerDirective::PresentPicker
            }
            PermissionStatus::Restricted
            | PermissionStatus::Denied
            | PermissionStatus::Unknown(_) => PickerDirective::ShowSettingsAlert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_library_known_values_classify() {
        assert_eq!(PermissionStatus::from_photo_library_raw(0), PermissionStatus::NotDetermined);
        assert_eq!(PermissionStatus::from_photo_library_raw(1), PermissionStatus::Restricted);
        assert_eq!(PermissionStatus::from_photo_library_raw(2), PermissionStatus::Denied);
        assert_eq!(PermissionStatus::from_photo_library_raw(3), PermissionStatus::Authorized);
        assert_eq!(PermissionStatus::from_photo_library_raw(4), PermissionStatus::Limited);
    }

    #[test]
    fn camera_has_no_limited_case() {
        assert_eq!(PermissionStatus::from_camera_raw(4), PermissionStatus::Unknown(4));
    }

    #[test]
    fn unrecognized_values_never_panic() {
        assert_eq!(PermissionStatus::from_photo_library_raw(99), PermissionStatus::Unknown(99));
        assert_eq!(PermissionStatus::from_camera_raw(-1), PermissionStatus::Unknown(-1));
    }

    #[test]
    fn directives_cover_every_status() {
        assert_eq!(PermissionStatus::NotDetermined.directive(), PickerDirective::RequestAccess);
        assert_eq!(PermissionStatus::Authorized.directive(), PickerDirective::PresentPicker);
        assert_eq!(PermissionStatus::Limited.directive(), PickerDirective::PresentPicker);
        assert_eq!(PermissionStatus::Restricted.directive(), PickerDirective::ShowSettingsAlert);
        assert_eq!(PermissionStatus::Denied.directive(), PickerDirective::ShowSettingsAlert);
    }

    #[test]
    fn unknown_status_is_treated_as_denied() {
        assert_eq!(
            PermissionStatus::Unknown(42).directive(),
            PickerDirective::ShowSettingsAlert
        );
    }
}
