//! Cluster address expansion.
//!
//! A comma-separated address span is expanded into an ordered list of
//! `host:port` pairs. Two spellings are accepted: `ip1,ip2:port` and the
//! IPv6-friendly `[ip1,ip2]:port`. Expansion is pure; persisting the result
//! as a named-service file is the job of [`crate::service::ServiceFile`].

use crate::error::{DsnError, DsnResult};

/// A single network endpoint. The port is kept as a string so that
/// re-rendering a parsed descriptor is lossless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    /// Host name or IP literal. IPv6 literals keep their surrounding brackets.
    pub host: String,
    /// Port, possibly empty when the source address carried none.
    pub port: String,
}

impl HostPort {
    /// Render back to `host:port`, or just `host` when no port is present.
    pub fn render(&self) -> String {
        if self.port.is_empty() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// An ordered sequence of endpoints derived from one address span.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterAddressList {
    entries: Vec<HostPort>,
    clustered: bool,
}

impl ClusterAddressList {
    /// Expand an address span into its endpoint list.
    ///
    /// An address without a comma is a single endpoint. A comma-separated
    /// address is a cluster and must carry a shared trailing port; hosts are
    /// trimmed of surrounding whitespace and empty entries are skipped.
    pub fn expand(address: &str) -> DsnResult<Self> {
        if address.is_empty() {
            return Ok(Self::default());
        }

        if !address.contains(',') {
            let (host, port) = split_host_port(address);
            return Ok(Self {
                entries: vec![HostPort {
                    host: host.to_string(),
                    port: port.to_string(),
                }],
                clustered: false,
            });
        }

        if let Some(bracket) = address.rfind(']') {
            // [ip1,ip2]:port
            let hosts = address[..bracket].trim_start_matches('[');
            let port = address[bracket + 1..]
                .strip_prefix(':')
                .filter(|p| !p.is_empty())
                .ok_or(DsnError::MissingSymbol)?;
            let entries = hosts
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(|h| HostPort {
                    host: format!("[{}]", h),
                    port: port.to_string(),
                })
                .collect();
            Ok(Self {
                entries,
                clustered: true,
            })
        } else {
            // ip1,ip2:port
            let (hosts, port) = address.rsplit_once(':').ok_or(DsnError::MissingSymbol)?;
            if port.is_empty() {
                return Err(DsnError::MissingSymbol);
            }
            let entries = hosts
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(|h| HostPort {
                    host: h.to_string(),
                    port: port.to_string(),
                })
                .collect();
            Ok(Self {
                entries,
                clustered: true,
            })
        }
    }

    /// Whether the source address listed more than one host.
    pub fn is_cluster(&self) -> bool {
        self.clustered
    }

    /// Whether the list holds no endpoint at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The expanded endpoints, in source order.
    pub fn entries(&self) -> &[HostPort] {
        &self.entries
    }

    /// The sole endpoint of a non-cluster address.
    pub fn single(&self) -> Option<&HostPort> {
        if self.clustered {
            None
        } else {
            self.entries.first()
        }
    }

    /// Re-render the list in the spelling it was parsed from.
    pub fn render(&self) -> String {
        if !self.clustered {
            return self.entries.first().map(HostPort::render).unwrap_or_default();
        }
        let port = self.entries.first().map(|e| e.port.as_str()).unwrap_or("");
        let bracketed = self.entries.first().is_some_and(|e| e.host.starts_with('['));
        let hosts: Vec<&str> = self
            .entries
            .iter()
            .map(|e| e.host.trim_start_matches('[').trim_end_matches(']'))
            .collect();
        if bracketed {
            format!("[{}]:{}", hosts.join(","), port)
        } else {
            format!("{}:{}", hosts.join(","), port)
        }
    }

    /// The `host1:port1,host2:port2,...` body of a service descriptor.
    pub fn service_body(&self) -> String {
        self.entries
            .iter()
            .map(HostPort::render)
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn split_host_port(address: &str) -> (&str, &str) {
    if let Some(bracket) = address.rfind(']') {
        match address[bracket + 1..].strip_prefix(':') {
            Some(port) => (&address[..=bracket], port),
            None => (address, ""),
        }
    } else {
        match address.rsplit_once(':') {
            Some((host, port)) => (host, port),
            None => (address, ""),
        }
    }
}
