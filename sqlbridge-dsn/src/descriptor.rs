//! The generic connection descriptor and its parser.

use std::fmt;

use crate::cluster::ClusterAddressList;
use crate::error::{DsnError, DsnResult};

/// One `key=value` connection parameter, or a bare flag when the source entry
/// carried no `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter value; `None` for a bare flag.
    pub value: Option<String>,
}

impl Param {
    /// Create a `key=value` parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a bare flag.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Render back to `key=value` or the bare name.
    pub fn render(&self) -> String {
        match &self.value {
            Some(value) => format!("{}={}", self.name, value),
            None => self.name.clone(),
        }
    }
}

/// The parsed form of a `user[:password]@protocol(address)/database[?params]`
/// connection string.
///
/// Produced only by [`ConnectionDescriptor::parse`]; a parse failure yields a
/// typed error and no descriptor. The password never appears in `Debug`
/// output.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    /// User name, possibly empty.
    pub user: String,
    /// Password. `Some` only when the credentials carried a `:`; kept
    /// separate from an absent password so re-rendering is lossless.
    pub password: Option<String>,
    /// Network protocol, e.g. `tcp`.
    pub protocol: String,
    /// Expanded network address list.
    pub addresses: ClusterAddressList,
    /// Database (or schema) name, possibly empty.
    pub database: String,
    /// Connection parameters in source order.
    pub params: Vec<Param>,
}

impl ConnectionDescriptor {
    /// Parse a raw connection string.
    ///
    /// The search runs from the end of the input: the rightmost unescaped `/`
    /// separates the database name (the password or the address may contain
    /// one), and the rightmost `@` left of it separates the credentials from
    /// the network part. Within the network part the first `(` opens the
    /// address, which must close immediately before the slash.
    pub fn parse(dsn: &str) -> DsnResult<Self> {
        let slash = dsn.rfind('/').ok_or(DsnError::MissingSlash)?;
        let left = &dsn[..slash];

        // Position 0 is the boundary when no '@' is present: credentials are
        // optional, the network part is not allowed to contain '@' itself.
        let (credentials, network) = match left.rfind('@') {
            Some(at) => (&left[..at], &left[at + 1..]),
            None => ("", left),
        };

        let (user, password) = match credentials.find(':') {
            Some(colon) => (
                credentials[..colon].to_string(),
                Some(credentials[colon + 1..].to_string()),
            ),
            None => (credentials.to_string(), None),
        };

        let (protocol, address) = if network.is_empty() {
            (String::new(), "")
        } else {
            let open = network.find('(').ok_or(DsnError::MissingSymbol)?;
            if !network.ends_with(')') {
                // The character right before the slash must close the address.
                if network[open + 1..].contains(')') {
                    return Err(DsnError::UnescapedParen);
                }
                return Err(DsnError::UnterminatedAddress);
            }
            (
                network[..open].to_string(),
                &network[open + 1..network.len() - 1],
            )
        };

        let addresses = ClusterAddressList::expand(address)?;

        let right = &dsn[slash + 1..];
        let (database, raw_params) = match right.find('?') {
            Some(q) => (&right[..q], &right[q + 1..]),
            None => (right, ""),
        };

        let mut params = Vec::new();
        if !raw_params.is_empty() {
            for entry in raw_params.split('&') {
                match entry.split_once('=') {
                    Some((name, value)) => params.push(Param::new(name, value)),
                    None => params.push(Param::flag(entry)),
                }
            }
        }

        Ok(Self {
            user,
            password,
            protocol,
            addresses,
            database: database.to_string(),
            params,
        })
    }

    /// Re-render the descriptor in the generic grammar.
    ///
    /// For non-cluster inputs this is lossless modulo parameter remapping.
    pub fn format_dsn(&self) -> String {
        let mut out = String::new();
        if !self.user.is_empty() || self.password.is_some() {
            out.push_str(&self.user);
            if let Some(password) = &self.password {
                out.push(':');
                out.push_str(password);
            }
            out.push('@');
        }
        if !self.protocol.is_empty() || !self.addresses.is_empty() {
            out.push_str(&self.protocol);
            out.push('(');
            out.push_str(&self.addresses.render());
            out.push(')');
        }
        out.push('/');
        out.push_str(&self.database);
        if !self.params.is_empty() {
            out.push('?');
            let rendered: Vec<String> = self.params.iter().map(Param::render).collect();
            out.push_str(&rendered.join("&"));
        }
        out
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("protocol", &self.protocol)
            .field("addresses", &self.addresses)
            .field("database", &self.database)
            .field("params", &self.params)
            .finish()
    }
}
