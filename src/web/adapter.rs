//! Request adapter for collecting HTTP inputs into source bags.

use crate::{Config, Container, Source, Value};

use super::ExtractSources;

/// Adapter for collecting framework-specific request inputs into one bag
/// per [`Source`].
///
/// `RequestAdapter` is the primary integration point between web frameworks
/// and the cages. Framework code feeds it raw name/value pairs and gets back
/// nested [`Container`]s ready for a [`Supercage`](crate::Supercage).
///
/// Query parameters, form fields, cookies and file uploads use bracket
/// notation in their names:
///
/// - `address[zip]` stores `zip` inside the `address` container
/// - `tags[]` appends at the next integer index of `tags`
/// - a name with unbalanced brackets is stored under the literal name
///
/// Names nesting deeper than the adapter's `max_depth` are dropped with a
/// warning. Server and environment variables are always stored under their
/// literal names.
///
/// # Examples
///
/// ```
/// use input_cage::web::{ExtractSources, RequestAdapter};
/// use input_cage::{CageOptions, Catalog, Value};
///
/// let mut adapter = RequestAdapter::new("req-12345");
/// adapter.add_query_param("search", "donuts");
/// adapter.add_form_field("address[zip]", "12345");
/// adapter.add_form_field("tags[]", "pink");
/// adapter.add_form_field("tags[]", "sprinkles");
///
/// let cages = adapter.build_supercage(CageOptions::default(), Catalog::default());
///
/// assert_eq!(cages.post().get_digits("address/zip").unwrap().into_inner(), Value::text("12345"));
/// assert_eq!(cages.post().get_alpha("tags/1").unwrap().into_inner(), Value::text("sprinkles"));
/// assert!(cages.get().key_exists("search"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    /// Request identifier, used in diagnostics only
    request_id: String,
    /// Deepest nesting accepted from bracket names
    max_depth: usize,
    query_params: Container,
    form_fields: Container,
    cookies: Container,
    server_vars: Container,
    env_vars: Container,
    files: Container,
}

/// One uploaded file, as the framework received it.
///
/// Stored in the files bag as a container with the keys `name`, `type`,
/// `tmp_name`, `error` and `size`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileUpload {
    /// Client-supplied file name.
    pub name: String,
    /// Client-supplied MIME type.
    pub mime_type: String,
    /// Where the framework stored the upload.
    pub tmp_name: String,
    /// Upload error code, `0` on success.
    pub error: i64,
    /// Size in bytes.
    pub size: i64,
}

impl From<FileUpload> for Value {
    fn from(upload: FileUpload) -> Self {
        let mut entry = Container::new();
        entry.insert("name", upload.name);
        entry.insert("type", upload.mime_type);
        entry.insert("tmp_name", upload.tmp_name);
        entry.insert("error", upload.error);
        entry.insert("size", upload.size);
        Value::Map(entry)
    }
}

impl RequestAdapter {
    /// Creates an empty adapter for the given request.
    ///
    /// # Examples
    ///
    /// ```
    /// use input_cage::web::RequestAdapter;
    ///
    /// let adapter = RequestAdapter::new("req-001");
    /// assert_eq!(adapter.request_id(), "req-001");
    /// ```
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            max_depth: Config::DEFAULT_MAX_DEPTH,
            query_params: Container::new(),
            form_fields: Container::new(),
            cookies: Container::new(),
            server_vars: Container::new(),
            env_vars: Container::new(),
            files: Container::new(),
        }
    }

    /// Sets the deepest nesting accepted from bracket names.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Adds a query string parameter.
    pub fn add_query_param(&mut self, name: &str, value: impl Into<String>) {
        let value = Value::text(value);
        insert_named(
            &mut self.query_params,
            name,
            value,
            self.max_depth,
            &self.request_id,
            Source::Get,
        );
    }

    /// Adds a form body field.
    pub fn add_form_field(&mut self, name: &str, value: impl Into<String>) {
        let value = Value::text(value);
        insert_named(
            &mut self.form_fields,
            name,
            value,
            self.max_depth,
            &self.request_id,
            Source::Post,
        );
    }

    /// Adds a cookie.
    pub fn add_cookie(&mut self, name: &str, value: impl Into<String>) {
        let value = Value::text(value);
        insert_named(
            &mut self.cookies,
            name,
            value,
            self.max_depth,
            &self.request_id,
            Source::Cookie,
        );
    }

    /// Adds an uploaded file under its form field name.
    pub fn add_file(&mut self, field: &str, upload: FileUpload) {
        insert_named(
            &mut self.files,
            field,
            upload.into(),
            self.max_depth,
            &self.request_id,
            Source::Files,
        );
    }

    /// Adds a server variable under its literal name.
    pub fn add_server_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.server_vars.insert(name, Value::text(value));
    }

    /// Adds an environment variable under its literal name.
    pub fn add_env_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.env_vars.insert(name, Value::text(value));
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the bag collected for `source`.
    pub fn bag(&self, source: Source) -> &Container {
        match source {
            Source::Server => &self.server_vars,
            Source::Get => &self.query_params,
            Source::Post => &self.form_fields,
            Source::Cookie => &self.cookies,
            Source::Env => &self.env_vars,
            Source::Files => &self.files,
        }
    }
}

impl ExtractSources for RequestAdapter {
    fn extract_sources(&self) -> Vec<(Source, Container)> {
        Source::ALL
            .into_iter()
            .map(|source| (source, self.bag(source).clone()))
            .collect()
    }
}

/// Splits a bracket name into its segments. `None` marks an append (`[]`).
///
/// Returns `None` if the name is not well-formed bracket notation.
fn parse_name(name: &str) -> Option<Vec<Option<&str>>> {
    let (base, mut rest) = match name.find('[') {
        Some(0) => return None,
        Some(open) => name.split_at(open),
        None => return Some(vec![Some(name)]),
    };
    let mut segments = vec![Some(base)];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        let segment = &inner[..close];
        if segment.contains('[') {
            return None;
        }
        segments.push(if segment.is_empty() { None } else { Some(segment) });
        rest = &inner[close + 1..];
    }
    Some(segments)
}

fn insert_named(
    bag: &mut Container,
    name: &str,
    value: Value,
    max_depth: usize,
    request_id: &str,
    source: Source,
) {
    let segments = parse_name(name).unwrap_or_else(|| vec![Some(name)]);
    if segments.len() > max_depth {
        tracing::warn!(
            request_id,
            source = source.name(),
            levels = segments.len(),
            max_depth,
            "input name nested too deep, dropped"
        );
        return;
    }
    insert_at(bag, &segments, value);
}

fn insert_at(bag: &mut Container, segments: &[Option<&str>], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let key = match first {
        Some(key) => (*key).to_string(),
        None => bag.next_index(),
    };
    if rest.is_empty() {
        bag.insert(key, value);
        return;
    }
    let mut child = match bag.remove(&key) {
        Some(Value::Map(map)) => map,
        _ => Container::new(),
    };
    insert_at(&mut child, rest, value);
    bag.insert(key, child);
}
