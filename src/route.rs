//! Hash Routes
//!
//! Screens are addressed by the URL fragment (`#/quests/q1/edit`), so the app
//! works from any static host.

use explorers_client::query::encode_path_segment;
use percent_encoding::percent_decode_str;

/// Resource area of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Passports,
    Subscriptions,
    Collectibles,
    Collections,
    Quests,
    Mementos,
}

impl Section {
    /// Navigation order
    pub const ALL: [Section; 6] = [
        Section::Passports,
        Section::Subscriptions,
        Section::Collectibles,
        Section::Collections,
        Section::Quests,
        Section::Mementos,
    ];

    pub fn segment(&self) -> &'static str {
        match self {
            Section::Passports => "passports",
            Section::Subscriptions => "subscriptions",
            Section::Collectibles => "collectibles",
            Section::Collections => "collections",
            Section::Quests => "quests",
            Section::Mementos => "mementos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Passports => "Passports",
            Section::Subscriptions => "Subscriptions",
            Section::Collectibles => "Collectibles",
            Section::Collections => "Collections",
            Section::Quests => "Quests",
            Section::Mementos => "Mementos",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.segment() == segment)
    }

    pub fn editable(&self) -> bool {
        !matches!(self, Section::Subscriptions)
    }

    pub fn has_detail(&self) -> bool {
        matches!(
            self,
            Section::Collectibles | Section::Collections | Section::Subscriptions
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    List(Section),
    New(Section),
    Edit(Section, String),
    Detail(Section, String),
    NotFound(String),
}

impl Route {
    /// Parse a fragment, with or without the leading `#`
    pub fn parse(hash: &str) -> Self {
        let path = hash.trim_start_matches('#');
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().to_string())
            .collect();
        let parts: Vec<&str> = segments.iter().map(String::as_str).collect();

        let route = match parts.as_slice() {
            [] => Some(Route::Dashboard),
            ["login"] => Some(Route::Login),
            [section] => Section::from_segment(section).map(Route::List),
            [section, "new"] => Section::from_segment(section)
                .filter(Section::editable)
                .map(Route::New),
            [section, id, "edit"] => Section::from_segment(section)
                .filter(Section::editable)
                .map(|s| Route::Edit(s, id.to_string())),
            [section, id] => Section::from_segment(section)
                .filter(Section::has_detail)
                .map(|s| Route::Detail(s, id.to_string())),
            _ => None,
        };
        route.unwrap_or_else(|| Route::NotFound(path.to_string()))
    }

    /// Fragment for this route, including the `#`
    pub fn href(&self) -> String {
        match self {
            Route::Login => "#/login".to_string(),
            Route::Dashboard => "#/".to_string(),
            Route::List(section) => format!("#/{}", section.segment()),
            Route::New(section) => format!("#/{}/new", section.segment()),
            Route::Edit(section, id) => {
                format!("#/{}/{}/edit", section.segment(), encode_path_segment(id))
            }
            Route::Detail(section, id) => {
                format!("#/{}/{}", section.segment(), encode_path_segment(id))
            }
            Route::NotFound(path) => format!("#{}", path),
        }
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            Route::List(s) | Route::New(s) | Route::Edit(s, _) | Route::Detail(s, _) => Some(*s),
            _ => None,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_screen_shape() {
        assert_eq!(Route::parse(""), Route::Dashboard);
        assert_eq!(Route::parse("#/"), Route::Dashboard);
        assert_eq!(Route::parse("#/login"), Route::Login);
        assert_eq!(Route::parse("#/quests"), Route::List(Section::Quests));
        assert_eq!(Route::parse("#/quests/new"), Route::New(Section::Quests));
        assert_eq!(
            Route::parse("#/collections/col1/edit"),
            Route::Edit(Section::Collections, "col1".into())
        );
        assert_eq!(
            Route::parse("#/subscriptions/s1"),
            Route::Detail(Section::Subscriptions, "s1".into())
        );
    }

    #[test]
    fn read_only_and_detail_less_sections_are_not_found() {
        assert!(matches!(Route::parse("#/subscriptions/new"), Route::NotFound(_)));
        assert!(matches!(Route::parse("#/subscriptions/s1/edit"), Route::NotFound(_)));
        assert!(matches!(Route::parse("#/quests/q1"), Route::NotFound(_)));
        assert!(matches!(Route::parse("#/nowhere"), Route::NotFound(_)));
    }

    #[test]
    fn ids_survive_the_round_trip() {
        let route = Route::Edit(Section::Passports, "p 1/2".into());
        assert_eq!(route.href(), "#/passports/p%201%2F2/edit");
        assert_eq!(Route::parse(&route.href()), route);
    }
}
