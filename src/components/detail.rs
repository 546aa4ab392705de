use askama::Template;

use crate::models::{BadgeColor, Person};
use super::roster::Badge;

/// Read-only view of one person. `person == None` renders the
/// "No person selected" placeholder.
#[derive(Template)]
#[template(path = "components/person_detail.html")]
pub struct PersonDetailTemplate<'a> {
    pub person: Option<&'a Person>,
    pub action_path: &'a str,
    pub memberships: Vec<Badge>,
    pub tags: Vec<Badge>,
}

impl<'a> PersonDetailTemplate<'a> {
    pub fn new(person: Option<&'a Person>, action_path: &'a str) -> Self {
        let memberships = person
            .map(|p| {
                p.groups
                    .iter()
                    .map(|g| match g.access_level {
                        Some(access) => Badge::light(format!("{} · {}", g.name, access.label()), access.color()),
                        None => Badge::light(&g.name, BadgeColor::Gray),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let tags = person
            .map(|p| p.tags.iter().map(|t| Badge::dot(&t.name)).collect())
            .unwrap_or_default();
        PersonDetailTemplate { person, action_path, memberships, tags }
    }
}
