// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration document loader.
//!
//! The loader reads a document from disk, deserializes it into the caller's type
//! and resolves every indirection inside it before handing it back.

use crate::adapters::{JsonParser, ProcessEnv};
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, EnvLookup, Record};
use crate::service::Resolver;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use zeroize::Zeroizing;

/// Maximum allowed size for configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON documents (`.json`)
    #[default]
    Json,
    /// YAML documents (`.yaml`, `.yml`), available with the `yaml` feature
    Yaml,
}

impl DocumentFormat {
    /// Picks a format from a file extension, ignoring ASCII case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        if JsonParser::new().supports_extension(extension) {
            Some(DocumentFormat::Json)
        } else if ["yaml", "yml"]
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
        {
            Some(DocumentFormat::Yaml)
        } else {
            None
        }
    }

    /// Picks a format from a path's extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }

    /// Deserializes `content` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            DocumentFormat::Json => JsonParser::new().parse(content),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => crate::adapters::YamlParser::new().parse(content),
            #[cfg(not(feature = "yaml"))]
            DocumentFormat::Yaml => Err(ConfigError::UnsupportedFormat {
                format: "yaml".to_string(),
            }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Loads configuration documents and resolves their indirections.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgref::resolvable;
/// use cfgref::service::ConfigLoader;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Config {
///     database_url: String,
/// }
/// resolvable!(Config { database_url });
///
/// # fn main() -> cfgref::domain::Result<()> {
/// let config: Config = ConfigLoader::new()
///     .with_secret(std::env::var("CONFIG_SECRET").unwrap_or_default())
///     .load_from_file("config.json")?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigLoader {
    secret: Zeroizing<String>,
    env: Box<dyn EnvLookup>,
    format: Option<DocumentFormat>,
}

impl ConfigLoader {
    /// Creates a loader that reads the process environment and has no secret.
    pub fn new() -> Self {
        Self {
            secret: Zeroizing::new(String::new()),
            env: Box::new(ProcessEnv::new()),
            format: None,
        }
    }

    /// Sets the hex-encoded secret used for `#EncryptedENV:` indirections.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Zeroizing::new(secret.into());
        self
    }

    /// Replaces the environment the indirections are resolved against.
    pub fn with_env(mut self, env: impl EnvLookup + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Forces a document format instead of guessing it from the file extension.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Reads, deserializes and resolves the document at `path`.
    ///
    /// # Errors
    ///
    /// * `ConfigError::FileNotFound` - nothing exists at `path`
    /// * `ConfigError::FileTooLarge` - the file exceeds 10MB
    /// * `ConfigError::IoError` - the file could not be read
    /// * `ConfigError::ParseError` - the content is malformed
    /// * any error from the resolver, unchanged
    pub fn load_from_file<T, P>(&self, path: P) -> Result<T>
    where
        T: DeserializeOwned + Record,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content = read_config_file(path)?;
        let format = self.format.unwrap_or_else(|| DocumentFormat::from_path(path));

        tracing::debug!(
            "Loaded configuration file {} ({} bytes, format={})",
            path.display(),
            content.len(),
            format
        );

        self.load_from_str_as(&content, format)
    }

    /// Deserializes and resolves `content`.
    ///
    /// Uses the forced format if one was set, JSON otherwise.
    pub fn load_from_str<T>(&self, content: &str) -> Result<T>
    where
        T: DeserializeOwned + Record,
    {
        self.load_from_str_as(content, self.format.unwrap_or_default())
    }

    /// Loads `filename` from the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    /// * `filename` - The configuration file name (e.g., "config.json")
    pub fn load_from_default_location<T>(
        &self,
        app_name: &str,
        qualifier: &str,
        filename: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned + Record,
    {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                "Failed to determine project directories",
            ))
        })?;

        self.load_from_file(proj_dirs.config_dir().join(filename))
    }

    /// Resolves an already-deserialized value with this loader's environment and secret.
    pub fn resolve<T: Record + ?Sized>(&self, value: &mut T) -> Result<()> {
        Resolver::new(self.env.as_ref(), &self.secret).resolve_root(value)
    }

    fn load_from_str_as<T>(&self, content: &str, format: DocumentFormat) -> Result<T>
    where
        T: DeserializeOwned + Record,
    {
        let mut value: T = format.parse(content)?;
        self.resolve(&mut value)?;
        Ok(value)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("env", &self.env.name())
            .field("secret", &"<redacted>")
            .field("format", &self.format)
            .finish()
    }
}

/// Reads a configuration file after checking that it exists and is not oversized.
fn read_config_file(path: &Path) -> Result<String> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(ConfigError::IoError(e)),
    };

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            size: metadata.len(),
            max: MAX_CONFIG_FILE_SIZE,
        });
    }

    Ok(fs::read_to_string(path)?)
}

/// Loads the document at `path`, resolving it against the process environment.
///
/// `secret` is the hex-encoded AES-256 key for `#EncryptedENV:` indirections and
/// may be empty if the document has none.
pub fn load_from_file<T, P>(path: P, secret: &str) -> Result<T>
where
    T: DeserializeOwned + Record,
    P: AsRef<Path>,
{
    ConfigLoader::new().with_secret(secret).load_from_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MapEnv;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Deserialize)]
    struct Config {
        foo: String,
        bar: Bar,
    }

    #[derive(Debug, Deserialize)]
    struct Bar {
        inner_foo: String,
        inner_bar: String,
    }

    crate::resolvable!(
        Bar { inner_foo, inner_bar }
        Config { foo, bar }
    );

    const DOCUMENT: &str = r##"{
  "foo" : "1",
  "bar" :{
    "inner_foo" : "#ENV:TestKey",
    "inner_bar" : "3"
  }
}"##;

    fn temp_file_with_suffix(suffix: &str) -> NamedTempFile {
        tempfile::Builder::new().suffix(suffix).tempfile().unwrap()
    }

    fn loader() -> ConfigLoader {
        ConfigLoader::new().with_env(MapEnv::from_iter([("TestKey", "2")]))
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("json"), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_extension("YML"), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_extension("toml"), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("/etc/app/config.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("config")),
            DocumentFormat::Json
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = temp_file_with_suffix(".json");
        write!(temp_file, "{}", DOCUMENT).unwrap();

        let config: Config = loader().load_from_file(temp_file.path()).unwrap();

        assert_eq!(config.foo, "1");
        assert_eq!(config.bar.inner_foo, "2");
        assert_eq!(config.bar.inner_bar, "3");
    }

    #[test]
    fn test_load_missing_file() {
        let result: Result<Config> = loader().load_from_file("/nonexistent/path/to/config.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{\"foo\": ").unwrap();

        let result: Result<Config> = loader().load_from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_resolver_error_passes_through() {
        let result: Result<Config> = ConfigLoader::new()
            .with_env(MapEnv::new())
            .load_from_str(DOCUMENT);
        assert!(matches!(
            result,
            Err(ConfigError::EnvVarNotFound { ref key }) if key == "TestKey"
        ));
    }

    #[derive(Debug, Deserialize)]
    struct Credentials {
        host: String,
        password: String,
        #[serde(default)]
        note: String,
    }

    crate::resolvable!(Credentials { host, password, note: skip });

    #[test]
    fn test_every_listed_field_is_resolved() {
        let config: Credentials = ConfigLoader::new()
            .with_env(MapEnv::from_iter([("H", "db.internal"), ("PW", "secret")]))
            .load_from_str(r##"{"host": "#ENV:H", "password": "#ENV:PW", "note": "#ENV:PW"}"##)
            .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.password, "secret");
        assert_eq!(config.note, "#ENV:PW");
    }

    #[cfg(not(feature = "yaml"))]
    #[test]
    fn test_yaml_without_feature_is_unsupported() {
        let mut temp_file = temp_file_with_suffix(".yml");
        writeln!(temp_file, "foo: \"1\"").unwrap();

        let result: Result<Config> = loader().load_from_file(temp_file.path());
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedFormat { ref format }) if format == "yaml"
        ));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_load_yaml_file() {
        let mut temp_file = temp_file_with_suffix(".yml");
        writeln!(
            temp_file,
            "foo: \"1\"\nbar:\n  inner_foo: \"#ENV:TestKey\"\n  inner_bar: \"3\""
        )
        .unwrap();

        let config: Config = loader().load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.bar.inner_foo, "2");
    }

    #[test]
    fn test_forced_format() {
        let mut temp_file = temp_file_with_suffix(".conf");
        write!(temp_file, "{}", DOCUMENT).unwrap();

        let config: Config = loader()
            .with_format(DocumentFormat::Json)
            .load_from_file(temp_file.path())
            .unwrap();
        assert_eq!(config.bar.inner_foo, "2");
    }

    #[test]
    fn test_dynamic_document() {
        let value: serde_json::Value = loader().load_from_str(DOCUMENT).unwrap();
        assert_eq!(value["bar"]["inner_foo"], "2");

        let result: Result<serde_json::Value> = loader().load_from_str("[\"#ENV:TestKey\"]");
        assert!(matches!(result, Err(ConfigError::InvalidRoot { .. })));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let text = format!("{:?}", ConfigLoader::new().with_secret("cafebabe"));
        assert!(!text.contains("cafebabe"));
    }
}
