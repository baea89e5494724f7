//! Layout constants for the hostname fields embedded in BF2.exe
//!
//! Widths are the sizes of the slots the strings occupy in the shipped
//! executable, counts are how often each slot appears. Both are fixed for the
//! single supported build.

use crate::error::Result;
use crate::field::FixedField;

use super::Field;

/// A hostname-bearing string: `prefix + hostname + suffix`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTemplate {
    pub field: Field,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub width: usize,
    pub count: usize,
}

impl FieldTemplate {
    pub fn text(&self, hostname: &str) -> String {
        format!("{}{}{}", self.prefix, hostname, self.suffix)
    }

    pub fn render(&self, hostname: &str) -> Result<FixedField> {
        FixedField::new(self.text(hostname), self.width)
    }
}

pub const STATS_HOST: FieldTemplate = FieldTemplate {
    field: Field::StatsHost,
    prefix: "gamestats.",
    suffix: "",
    width: 21,
    count: 2,
};

pub const PLAYER_INFO_URL: FieldTemplate = FieldTemplate {
    field: Field::PlayerInfoUrl,
    prefix: "http://stage-net.",
    suffix: "/bf2/getplayerinfo.aspx?pid=",
    width: 56,
    count: 1,
};

/// Also a prefix of [`WEB_SERVICE_URL`]'s host part; only the padded form
/// (host followed by a null byte) is unique to this slot.
pub const WEB_SERVICE_HOST: FieldTemplate = FieldTemplate {
    field: Field::WebServiceHost,
    prefix: "BF2Web.",
    suffix: "",
    width: 19,
    count: 1,
};

pub const WEB_SERVICE_URL: FieldTemplate = FieldTemplate {
    field: Field::WebServiceUrl,
    prefix: "http://BF2Web.",
    suffix: "/ASP/",
    width: 30,
    count: 1,
};

pub const AVAILABLE_LOOKUP: FieldTemplate = FieldTemplate {
    field: Field::AvailableLookup,
    prefix: "%s.available.",
    suffix: "",
    width: 24,
    count: 1,
};

pub const MASTER_LOOKUP: FieldTemplate = FieldTemplate {
    field: Field::MasterLookup,
    prefix: "%s.master.",
    suffix: "",
    width: 21,
    count: 1,
};

pub const GPCM_HOST: FieldTemplate = FieldTemplate {
    field: Field::GpcmHost,
    prefix: "gpcm.",
    suffix: "",
    width: 16,
    count: 1,
};

pub const GPSP_HOST: FieldTemplate = FieldTemplate {
    field: Field::GpspHost,
    prefix: "gpsp.",
    suffix: "",
    width: 16,
    count: 1,
};

/// Fields patched for every transition, in application order
pub const COMMON_FIELDS: [FieldTemplate; 8] = [
    STATS_HOST,
    PLAYER_INFO_URL,
    WEB_SERVICE_HOST,
    WEB_SERVICE_URL,
    AVAILABLE_LOOKUP,
    MASTER_LOOKUP,
    GPCM_HOST,
    GPSP_HOST,
];

pub const MASTER_SERVER: FieldTemplate = FieldTemplate {
    field: Field::MasterServer,
    prefix: "%s.ms%d.",
    suffix: "",
    width: 19,
    count: 1,
};

/// [`MASTER_SERVER`] as laid out by backends that drop the `%d` placeholder
pub const MASTER_SERVER_NO_PLACEHOLDER: FieldTemplate = FieldTemplate {
    prefix: "%s.ms.",
    ..MASTER_SERVER
};

pub const HOSTS_PATH_COUNT: usize = 1;
pub const COMPANION_LIBRARY_COUNT: usize = 1;
