use serde::{Deserialize, Serialize};

/// Badge colors understood by the stylesheet (`badge-<name>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Gray,
    Yellow,
    Blue,
    Red,
    Green,
}

impl BadgeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeColor::Gray => "gray",
            BadgeColor::Yellow => "yellow",
            BadgeColor::Blue => "blue",
            BadgeColor::Red => "red",
            BadgeColor::Green => "green",
        }
    }
}

/// Site-wide role of a person. Encoded on the wire as a nullable integer:
/// `null` = no access, `0` = needs approval, `1` = organizer, `2` = admin.
///
/// Values outside that set are kept as `Unknown` so they round-trip and
/// render with a neutral badge instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum GlobalAccess {
    #[default]
    NoAccess,
    NeedsApproval,
    Organizer,
    Admin,
    Unknown(i64),
}

impl GlobalAccess {
    /// Levels an operator may grant from the role form.
    pub const ASSIGNABLE: [GlobalAccess; 3] = [
        GlobalAccess::NeedsApproval,
        GlobalAccess::Organizer,
        GlobalAccess::Admin,
    ];

    pub fn level(&self) -> Option<i64> {
        match self {
            GlobalAccess::NoAccess => None,
            GlobalAccess::NeedsApproval => Some(0),
            GlobalAccess::Organizer => Some(1),
            GlobalAccess::Admin => Some(2),
            GlobalAccess::Unknown(n) => Some(*n),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GlobalAccess::NoAccess => "No Access",
            GlobalAccess::NeedsApproval => "Needs Approval",
            GlobalAccess::Organizer => "Organizer",
            GlobalAccess::Admin => "Admin",
            GlobalAccess::Unknown(_) => "Unknown",
        }
    }

    pub fn color(&self) -> BadgeColor {
        match self {
            GlobalAccess::NoAccess | GlobalAccess::Unknown(_) => BadgeColor::Gray,
            GlobalAccess::NeedsApproval => BadgeColor::Yellow,
            GlobalAccess::Organizer => BadgeColor::Blue,
            GlobalAccess::Admin => BadgeColor::Red,
        }
    }

    /// True when the person holds a role row (anything but `null`).
    pub fn is_assigned(&self) -> bool {
        !matches!(self, GlobalAccess::NoAccess)
    }
}

impl From<Option<i64>> for GlobalAccess {
    fn from(level: Option<i64>) -> Self {
        match level {
            None => GlobalAccess::NoAccess,
            Some(0) => GlobalAccess::NeedsApproval,
            Some(1) => GlobalAccess::Organizer,
            Some(2) => GlobalAccess::Admin,
            Some(n) => GlobalAccess::Unknown(n),
        }
    }
}

impl From<GlobalAccess> for Option<i64> {
    fn from(access: GlobalAccess) -> Self {
        access.level()
    }
}

/// Access a member holds inside one organization: `1` = view, `2` = edit.
///
/// Every level other than `2` reads as `View`, matching how the members
/// roster badges them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum GroupAccess {
    #[default]
    View,
    Edit,
}

impl GroupAccess {
    pub const ALL: [GroupAccess; 2] = [GroupAccess::View, GroupAccess::Edit];

    pub fn level(&self) -> i64 {
        match self {
            GroupAccess::View => 1,
            GroupAccess::Edit => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupAccess::View => "View",
            GroupAccess::Edit => "Edit",
        }
    }

    pub fn color(&self) -> BadgeColor {
        match self {
            GroupAccess::View => BadgeColor::Blue,
            GroupAccess::Edit => BadgeColor::Green,
        }
    }
}

impl From<i64> for GroupAccess {
    fn from(level: i64) -> Self {
        if level == 2 { GroupAccess::Edit } else { GroupAccess::View }
    }
}

impl From<GroupAccess> for i64 {
    fn from(access: GroupAccess) -> Self {
        access.level()
    }
}
