//! Configuration and constants for the diff core.

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Meta fields stripped during normalization.
///
/// These are environment-specific or server-managed and change between
/// workspace and live copies of an otherwise identical entity, so keeping
/// them would drown the diff in noise. The list includes the GTM API's own
/// `fingerprint` field; the crate derives its own content fingerprint instead.
pub const META_FIELD_NAMES: &[&str] = &[
    "path",
    "tagManagerUrl",
    "fingerprint",
    "accountId",
    "containerId",
    "workspaceId",
    "parentFolderId",
];

/// Display-name field shared by every category
pub const NAME_FIELD: &str = "name";

/// Canonical bucket for unrecognized raw fields
pub const EXTRA_FIELD: &str = "extra";

// Recognized raw fields per category, mapped to canonical snake_case names.
// Field names follow the Tag Manager v2 API resource shapes.
pub const TAG_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("type", "type"),
    ("parameter", "parameters"),
    ("firingTriggerId", "firing_trigger_ids"),
    ("blockingTriggerId", "blocking_trigger_ids"),
    ("setupTag", "setup_tags"),
    ("teardownTag", "teardown_tags"),
    ("consentSettings", "consent_settings"),
    ("paused", "paused"),
    ("priority", "priority"),
    ("notes", "notes"),
    ("tagFiringOption", "tag_firing_option"),
    ("scheduleStartMs", "schedule_start_ms"),
    ("scheduleEndMs", "schedule_end_ms"),
    ("monitoringMetadata", "monitoring_metadata"),
];

pub const TRIGGER_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("type", "type"),
    ("filter", "filters"),
    ("customEventFilter", "custom_event_filters"),
    ("autoEventFilter", "auto_event_filters"),
    ("waitForTags", "wait_for_tags"),
    ("waitForTagsTimeout", "wait_for_tags_timeout"),
    ("checkValidation", "check_validation"),
    ("uniqueTriggerId", "unique_trigger_id"),
    ("parameter", "parameters"),
    ("notes", "notes"),
];

pub const VARIABLE_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("type", "type"),
    ("parameter", "parameters"),
    ("formatValue", "format_value"),
    ("enablingTriggerId", "enabling_trigger_ids"),
    ("disablingTriggerId", "disabling_trigger_ids"),
    ("notes", "notes"),
];

pub const BUILT_IN_VARIABLE_FIELDS: &[(&str, &str)] = &[("name", "name"), ("type", "type")];

// Identity fields per category, in lookup order. Identity is the persistent
// ID, never the display name: names can be renamed between versions.
// Built-in variables carry no numeric ID; their type enum is the stable key.
pub const TAG_IDENTITY_FIELDS: &[&str] = &["tagId"];
pub const TRIGGER_IDENTITY_FIELDS: &[&str] = &["triggerId"];
pub const VARIABLE_IDENTITY_FIELDS: &[&str] = &["variableId"];
pub const BUILT_IN_VARIABLE_IDENTITY_FIELDS: &[&str] = &["type", "name"];

/// Canonical tag fields that hold trigger ID references
pub const TAG_TRIGGER_REF_FIELDS: &[&str] = &["firing_trigger_ids", "blocking_trigger_ids"];

/// Canonical variable fields that hold trigger ID references
pub const VARIABLE_TRIGGER_REF_FIELDS: &[&str] = &["enabling_trigger_ids", "disabling_trigger_ids"];

/// Canonical field checked by the consent rule
pub const CONSENT_SETTINGS_FIELD: &str = "consent_settings";
