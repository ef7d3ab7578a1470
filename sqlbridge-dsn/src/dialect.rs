//! Per-backend rendering of a parsed descriptor.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::descriptor::{ConnectionDescriptor, Param};
use crate::error::DsnResult;
use crate::params::{ParamMode, ParamRule, ParamRules, remap_params};
use crate::service::ServiceFile;

/// Characters escaped inside the userinfo section of a rendered URL.
const USERINFO_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-escape a credential fragment for embedding in a URL.
pub fn escape_userinfo(fragment: &str) -> String {
    utf8_percent_encode(fragment, USERINFO_ESCAPE).to_string()
}

/// Rule table of the DM dialect.
pub const DM_PARAM_RULES: ParamRules = &[
    ("timeout", ParamRule::RenameDurationMillis("connectTimeout")),
    ("autocommit", ParamRule::Rename("autoCommit")),
];

/// Rule table of the Kingbase dialect.
pub const KINGBASE_PARAM_RULES: ParamRules =
    &[("timeout", ParamRule::RenameDurationSecs("connect_timeout"))];

/// Fixed maintenance database name in the Kingbase key/value form; the
/// payload schema travels in `search_path` instead.
pub const KINGBASE_BRIDGE_DBNAME: &str = "bridge";

/// A target connection-string grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// MySQL-compatible backends: the generic grammar is already native.
    MySql,
    /// DM: `dm://user:pass@host:port?params`, clusters via a named service.
    Dm,
    /// Kingbase: space-separated `key=value` pairs.
    Kingbase,
}

/// Knobs for descriptor rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Handling of parameters absent from the dialect rule table.
    pub mode: ParamMode,
    /// Target of the cluster service descriptor.
    pub service: ServiceFile,
}

impl Dialect {
    /// The dialect's parameter rule table.
    pub fn rules(&self) -> ParamRules {
        match self {
            Self::MySql => &[],
            Self::Dm => DM_PARAM_RULES,
            Self::Kingbase => KINGBASE_PARAM_RULES,
        }
    }

    /// Render a descriptor into the backend-native connection string.
    ///
    /// Parameter remapping runs before any side effect, so a remap failure
    /// leaves no service file behind.
    pub fn render(
        &self,
        descriptor: &ConnectionDescriptor,
        options: &RenderOptions,
    ) -> DsnResult<String> {
        match self {
            Self::MySql => Ok(descriptor.format_dsn()),
            Self::Dm => render_dm(descriptor, options),
            Self::Kingbase => render_kingbase(descriptor, options),
        }
    }
}

fn render_dm(descriptor: &ConnectionDescriptor, options: &RenderOptions) -> DsnResult<String> {
    let params = remap_params(&descriptor.params, DM_PARAM_RULES, options.mode)?;

    let host = if descriptor.addresses.is_cluster() {
        options.service.write(&descriptor.addresses)?;
        options.service.name.clone()
    } else {
        descriptor.addresses.render()
    };

    let mut url = String::from("dm://");
    if !descriptor.user.is_empty() || descriptor.password.is_some() {
        url.push_str(&descriptor.user);
        if let Some(password) = descriptor.password.as_deref().filter(|p| !p.is_empty()) {
            url.push(':');
            url.push_str(&escape_userinfo(password));
        }
        url.push('@');
    }
    url.push_str(&host);

    let mut query: Vec<String> = params.iter().map(Param::render).collect();
    query.push(format!("schema={}", descriptor.database));
    query.push("compatibleMode=mysql".to_string());
    query.push("escapeProcess=true".to_string());
    query.push(format!("svcConfPath={}", options.service.path.display()));
    url.push('?');
    url.push_str(&query.join("&"));
    Ok(url)
}

fn render_kingbase(
    descriptor: &ConnectionDescriptor,
    options: &RenderOptions,
) -> DsnResult<String> {
    let params = remap_params(&descriptor.params, KINGBASE_PARAM_RULES, options.mode)?;
    let timeout = params
        .iter()
        .find(|p| p.name == "connect_timeout")
        .and_then(|p| p.value.clone())
        .unwrap_or_else(|| "0".to_string());

    let mut parts = Vec::new();
    if !descriptor.user.is_empty() {
        parts.push(format!("user={}", descriptor.user));
    }
    if let Some(password) = descriptor.password.as_deref().filter(|p| !p.is_empty()) {
        parts.push(format!("password={}", password));
    }
    if let Some(endpoint) = descriptor.addresses.entries().first() {
        if !endpoint.host.is_empty() {
            let host = endpoint.host.trim_start_matches('[').trim_end_matches(']');
            parts.push(format!("host={}", host));
        }
        if !endpoint.port.is_empty() {
            parts.push(format!("port={}", endpoint.port));
        }
    }
    if !descriptor.database.is_empty() {
        parts.push(format!("search_path={}", descriptor.database));
    }
    parts.push(format!("connect_timeout={}", timeout));
    parts.push("sslmode=disable".to_string());
    parts.push(format!("dbname={}", KINGBASE_BRIDGE_DBNAME));
    Ok(parts.join(" "))
}
