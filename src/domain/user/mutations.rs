//! Mutation inputs for the user aggregate.
//!
//! Create inputs carry the caller-supplied fields for a new sub-entity;
//! patch inputs carry only the fields being changed; `None` means "leave
//! as is", so a partial update can never clobber a field the caller did
//! not send.

/// Fields for a new account.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub whatsapp_number: String,
    pub email: String,
    pub password: String,
}

/// Fields for a new group. Templates always start empty.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub group_ref: Option<String>,
    pub group_name: String,
    pub description: String,
    pub paid: bool,
    pub group_link: String,
}

#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub group_name: Option<String>,
    pub description: Option<String>,
    pub paid: Option<bool>,
    pub group_link: Option<String>,
}

/// Fields for a new community. The answer set and events start empty.
#[derive(Debug, Clone)]
pub struct NewCommunity {
    pub group_name: String,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub display_profile: Option<String>,
    pub group_rules: Option<String>,
    pub paid: bool,
    pub group_link: String,
    pub number_add: Option<bool>,
    pub group_ref: Option<String>,
    pub question_set: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CommunityPatch {
    pub group_name: Option<String>,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub display_profile: Option<String>,
    pub group_rules: Option<String>,
    pub paid: Option<bool>,
    pub group_link: Option<String>,
    pub number_add: Option<bool>,
}

/// Fields for a new event. All of them are mandatory.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub location: String,
    pub location_details: String,
    pub details: String,
    pub cover_image: String,
    pub paid: bool,
    pub amount: f64,
}
