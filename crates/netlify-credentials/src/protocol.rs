//! git credential helper protocol
//!
//! git writes `key=value` lines to the helper's stdin and reads the same
//! format back from stdout.

use std::fmt;
use std::io::{BufRead, Write};

pub const HOST_KEY: &str = "host";
pub const USERNAME_KEY: &str = "username";
pub const PASSWORD_KEY: &str = "password";
pub const PATH_KEY: &str = "path";

/// Username git-lfs sends along with a Netlify access token
pub const ACCESS_TOKEN_USER: &str = "access-token";

/// Hosts the helper answers for
pub const NETLIFY_HOST_SUFFIXES: [&str; 2] = [".netlify.app", ".netlify.com"];

pub fn is_netlify_host(host: &str) -> bool {
    NETLIFY_HOST_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(suffix))
}

/// The attributes of one credential request, in the order git sent them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRequest {
    fields: Vec<(String, String)>,
}

impl CredentialRequest {
    /// Read `key=value` lines until EOF. Lines without `=` are ignored.
    pub fn read_from<R: BufRead>(mut reader: R) -> std::io::Result<Self> {
        let mut request = Self::default();
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            request.add_line(&String::from_utf8_lossy(&line));
        }
        Ok(request)
    }

    pub fn parse(input: &str) -> Self {
        let mut request = Self::default();
        for line in input.lines() {
            request.add_line(line);
        }
        request
    }

    fn add_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\n', '\r']);
        if let Some((key, value)) = line.split_once('=') {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing an existing value in place
    pub fn set(&mut self, key: &str, value: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((key.to_string(), value.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Write all attributes as `key=value` lines
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        writer.write_all(out.as_bytes())?;
        writer.flush()
    }

    /// Loggable view of the request with the password masked
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

/// Display adapter that hides the password value
pub struct Redacted<'a>(&'a CredentialRequest);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if key == PASSWORD_KEY {
                write!(f, "{}=****************", key)?;
            } else {
                write!(f, "{}={}", key, value)?;
            }
        }
        write!(f, "}}")
    }
}
