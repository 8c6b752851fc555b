//! Admin registrations: which record kinds the admin API exposes and what
//! it may do with each. Built once at startup and shared through `AppState`.

use serde::Serialize;

pub const SITE_HEADER: &str = "Geoblog Administration";
pub const SITE_TITLE: &str = "Geoblog Admin";
pub const INDEX_TITLE: &str = "Welcome to Geoblog Administration";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Category,
    Location,
    Post,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    List,
    View,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fieldset {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredModel {
    pub kind: RecordKind,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub actions: &'static [AdminAction],
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    /// Field the slug is derived from when left empty.
    pub prepopulated_slug_from: Option<&'static str>,
    pub date_hierarchy: Option<&'static str>,
    pub ordering: &'static [&'static str],
    pub fieldsets: &'static [Fieldset],
    /// The requesting staff user becomes the author on create.
    pub auto_assign_author: bool,
}

impl RegisteredModel {
    pub fn allows(&self, action: AdminAction) -> bool {
        self.actions.contains(&action)
    }
}

const ALL_ACTIONS: &[AdminAction] = &[
    AdminAction::List,
    AdminAction::View,
    AdminAction::Create,
    AdminAction::Update,
    AdminAction::Delete,
];

#[derive(Debug, Clone)]
pub struct AdminRegistry {
    models: Vec<RegisteredModel>,
}

impl AdminRegistry {
    pub fn new(models: Vec<RegisteredModel>) -> Self {
        Self { models }
    }

    pub fn get(&self, kind: RecordKind) -> Option<&RegisteredModel> {
        self.models.iter().find(|m| m.kind == kind)
    }

    pub fn allows(&self, kind: RecordKind, action: AdminAction) -> bool {
        self.get(kind).is_some_and(|m| m.allows(action))
    }

    pub fn models(&self) -> &[RegisteredModel] {
        &self.models
    }
}

impl Default for AdminRegistry {
    fn default() -> Self {
        Self::new(vec![
            RegisteredModel {
                kind: RecordKind::Category,
                verbose_name: "category",
                verbose_name_plural: "categories",
                actions: ALL_ACTIONS,
                list_display: &["title", "slug", "is_published", "created_at"],
                list_filter: &["is_published", "created_at"],
                search_fields: &["title", "description"],
                prepopulated_slug_from: Some("title"),
                date_hierarchy: Some("created_at"),
                ordering: &["title"],
                fieldsets: &[
                    Fieldset { name: "Main", fields: &["title", "slug", "description"] },
                    Fieldset { name: "Publication", fields: &["is_published"] },
                ],
                auto_assign_author: false,
            },
            RegisteredModel {
                kind: RecordKind::Location,
                verbose_name: "location",
                verbose_name_plural: "locations",
                actions: ALL_ACTIONS,
                list_display: &["name", "is_published", "posts_count", "created_at"],
                list_filter: &["is_published", "created_at"],
                search_fields: &["name"],
                prepopulated_slug_from: None,
                date_hierarchy: Some("created_at"),
                ordering: &["name"],
                fieldsets: &[Fieldset { name: "Main", fields: &["name", "is_published"] }],
                auto_assign_author: false,
            },
            RegisteredModel {
                kind: RecordKind::Post,
                verbose_name: "post",
                verbose_name_plural: "posts",
                actions: ALL_ACTIONS,
                list_display: &[
                    "title",
                    "author",
                    "category",
                    "location",
                    "pub_date",
                    "is_published",
                    "status_badge",
                ],
                list_filter: &["is_published", "category", "location", "pub_date", "created_at"],
                search_fields: &["title", "text", "author__username"],
                prepopulated_slug_from: Some("title"),
                date_hierarchy: Some("pub_date"),
                ordering: &["-pub_date", "-created_at"],
                fieldsets: &[
                    Fieldset { name: "Main", fields: &["title", "slug", "text", "image"] },
                    Fieldset { name: "Categorization", fields: &["category", "location"] },
                    Fieldset { name: "Publication", fields: &["author", "pub_date", "is_published"] },
                ],
                auto_assign_author: true,
            },
            RegisteredModel {
                kind: RecordKind::User,
                verbose_name: "user",
                verbose_name_plural: "users",
                actions: &[AdminAction::List, AdminAction::Create, AdminAction::Delete],
                list_display: &["username", "email", "is_staff", "is_superuser"],
                list_filter: &["is_staff", "is_superuser"],
                search_fields: &["username", "email"],
                prepopulated_slug_from: None,
                date_hierarchy: None,
                ordering: &["username"],
                fieldsets: &[
                    Fieldset { name: "Account", fields: &["username", "email", "password"] },
                    Fieldset { name: "Permissions", fields: &["is_staff", "is_superuser"] },
                ],
                auto_assign_author: false,
            },
        ])
    }
}
