//! Modification planner
//!
//! Builds the ordered list of exact byte substitutions that move an
//! executable from one backend to another. The planner knows the layout of
//! the supported build but never looks at a binary; presence and counts are
//! verified when the plan is applied.

pub mod layout;

use serde::{Serialize, Serializer};
use strum::{Display, IntoStaticStr};
use tracing::debug;

use crate::backend::{Backend, BackendProfile, STAND_IN_LIBRARY};
use crate::error::{Error, Result};

use layout::{
    COMMON_FIELDS, COMPANION_LIBRARY_COUNT, FieldTemplate, HOSTS_PATH_COUNT, MASTER_SERVER,
    MASTER_SERVER_NO_PLACEHOLDER,
};

/// Location in the executable touched by a modification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr, Display)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[strum(serialize = "stats host")]
    StatsHost,
    #[strum(serialize = "player info URL")]
    PlayerInfoUrl,
    #[strum(serialize = "web service host")]
    WebServiceHost,
    #[strum(serialize = "web service URL")]
    WebServiceUrl,
    #[strum(serialize = "availability lookup")]
    AvailableLookup,
    #[strum(serialize = "master lookup")]
    MasterLookup,
    #[strum(serialize = "gpcm host")]
    GpcmHost,
    #[strum(serialize = "gpsp host")]
    GpspHost,
    #[strum(serialize = "master server format")]
    MasterServer,
    #[strum(serialize = "hosts path")]
    HostsPath,
    #[strum(serialize = "companion library")]
    CompanionLibrary,
}

/// Replace every occurrence of `old` with `new`; `old` must occur exactly
/// `count` times when the modification is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modification {
    pub field: Field,
    #[serde(serialize_with = "serialize_escaped")]
    pub old: Vec<u8>,
    #[serde(serialize_with = "serialize_escaped")]
    pub new: Vec<u8>,
    pub count: usize,
}

impl Modification {
    pub fn new(
        field: Field,
        old: impl Into<Vec<u8>>,
        new: impl Into<Vec<u8>>,
        count: usize,
    ) -> Self {
        Self {
            field,
            old: old.into(),
            new: new.into(),
            count,
        }
    }

    fn from_template(template: &FieldTemplate, old_host: &str, new_host: &str) -> Result<Self> {
        Ok(Self::new(
            template.field,
            template.render(old_host)?.into_raw(),
            template.render(new_host)?.into_raw(),
            template.count,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub from: Backend,
    pub to: Backend,
    pub modifications: Vec<Modification>,
}

impl Plan {
    pub fn iter(&self) -> std::slice::Iter<'_, Modification> {
        self.modifications.iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Modification;
    type IntoIter = std::slice::Iter<'a, Modification>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build the modifications that convert a `from` binary into a `to` binary
pub fn plan(from: Backend, to: Backend) -> Result<Plan> {
    let (Some(old), Some(new)) = (from.profile(), to.profile()) else {
        return Err(Error::UnsupportedTransition { from, to });
    };
    if from == to {
        return Err(Error::UnsupportedTransition { from, to });
    }

    let mut modifications = Vec::with_capacity(COMMON_FIELDS.len() + 3);

    for template in &COMMON_FIELDS {
        modifications.push(Modification::from_template(
            template,
            old.field_hostname,
            new.field_hostname,
        )?);
    }

    modifications.push(Modification::new(
        Field::HostsPath,
        old.hosts_path,
        new.hosts_path,
        HOSTS_PATH_COUNT,
    ));

    if let Some(library) = companion_library_swap(old, new) {
        modifications.push(library);
    }

    modifications.push(Modification::new(
        Field::MasterServer,
        master_server_template(old)
            .render(old.field_hostname)?
            .into_raw(),
        master_server_template(new)
            .render(new.field_hostname)?
            .into_raw(),
        MASTER_SERVER.count,
    ));

    debug!(
        "Planned {} modifications for {} -> {}",
        modifications.len(),
        from,
        to
    );

    Ok(Plan {
        from,
        to,
        modifications,
    })
}

fn master_server_template(profile: &BackendProfile) -> &'static FieldTemplate {
    if profile.master_placeholder {
        &MASTER_SERVER
    } else {
        &MASTER_SERVER_NO_PLACEHOLDER
    }
}

fn companion_library_swap(old: &BackendProfile, new: &BackendProfile) -> Option<Modification> {
    let (from, to) = match (old.companion_library, new.companion_library) {
        (Some(from), Some(to)) => (from, to),
        (Some(from), None) => (from, STAND_IN_LIBRARY),
        (None, Some(to)) => (STAND_IN_LIBRARY, to),
        (None, None) => return None,
    };

    Some(Modification::new(
        Field::CompanionLibrary,
        from,
        to,
        COMPANION_LIBRARY_COUNT,
    ))
}

/// Render bytes as printable ASCII with escapes (`\x00` for padding)
pub fn escape_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}

fn serialize_escaped<S: Serializer>(
    bytes: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&escape_bytes(bytes))
}
