//! One cage per request input source.

use std::fmt;
use std::str::FromStr;

use crate::{Cage, CageOptions, Catalog, Container, Error, ErrorKind};

/// A request input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// Server and request metadata.
    Server,
    /// Query string parameters.
    Get,
    /// Form body fields.
    Post,
    /// Cookies.
    Cookie,
    /// Process environment.
    Env,
    /// Uploaded files.
    Files,
}

impl Source {
    /// Every source, in index order.
    pub const ALL: [Source; 6] = [
        Source::Server,
        Source::Get,
        Source::Post,
        Source::Cookie,
        Source::Env,
        Source::Files,
    ];

    /// Returns the source's name.
    pub fn name(self) -> &'static str {
        match self {
            Source::Server => "server",
            Source::Get => "get",
            Source::Post => "post",
            Source::Cookie => "cookie",
            Source::Env => "env",
            Source::Files => "files",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|source| source.name() == name)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::UnknownSource,
                    format!("unknown input source '{}'", name),
                )
            })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A namespaced collection of cages, one per [`Source`].
///
/// Every source has a cage; sources not supplied at construction get an
/// empty one. If a source is supplied twice the last bag wins.
///
/// # Examples
///
/// ```
/// use input_cage::{CageOptions, Catalog, Container, ErrorKind, Source, Supercage, Value};
///
/// let get: Container = [("page", "3")].into_iter().collect();
/// let post: Container = [("comment", "<script>hi</script>")].into_iter().collect();
///
/// let cages = Supercage::new(
///     [(Source::Get, get), (Source::Post, post)],
///     CageOptions::default(),
///     Catalog::default(),
/// );
///
/// assert_eq!(cages.get().get_int("page").unwrap().into_inner(), Value::from(3));
/// assert_eq!(
///     cages.source("post").unwrap().no_tags("comment").unwrap().into_inner(),
///     Value::text("hi")
/// );
/// assert!(cages.cookie().is_empty());
/// assert_eq!(cages.source("session").unwrap_err().kind(), ErrorKind::UnknownSource);
/// ```
pub struct Supercage {
    cages: [Cage; 6],
    catalog: Catalog,
}

impl Supercage {
    /// Builds one cage per source from owned bags.
    pub fn new<I>(sources: I, options: CageOptions, catalog: Catalog) -> Self
    where
        I: IntoIterator<Item = (Source, Container)>,
    {
        let mut bags: [Option<Container>; 6] = Default::default();
        for (source, bag) in sources {
            bags[source.index()] = Some(bag);
        }
        let cages = Source::ALL.map(|source| {
            let bag = bags[source.index()].take().unwrap_or_default();
            Cage::new(bag, options, catalog.clone())
        });
        Self::assemble(cages, catalog)
    }

    /// Builds one cage per source from caller-held bags.
    ///
    /// Each bag is ingested as [`Cage::ingest`] does, so a strict
    /// supercage leaves every supplied bag empty.
    pub fn ingest<'a, I>(sources: I, options: CageOptions, catalog: Catalog) -> Self
    where
        I: IntoIterator<Item = (Source, &'a mut Container)>,
    {
        let mut slots: [Option<Cage>; 6] = Default::default();
        for (source, bag) in sources {
            slots[source.index()] = Some(Cage::ingest(bag, options, catalog.clone()));
        }
        let cages = Source::ALL.map(|source| {
            slots[source.index()]
                .take()
                .unwrap_or_else(|| Cage::new(Container::new(), options, catalog.clone()))
        });
        Self::assemble(cages, catalog)
    }

    /// Builds a supercage from bags keyed by source name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSource` (reported) for the first name that is not a
    /// source.
    pub fn from_named<I, K>(
        sources: I,
        options: CageOptions,
        catalog: Catalog,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, Container)>,
        K: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (name, bag) in sources {
            let source = catalog.settle(name.as_ref().parse::<Source>())?;
            parsed.push((source, bag));
        }
        Ok(Self::new(parsed, options, catalog))
    }

    fn assemble(cages: [Cage; 6], catalog: Catalog) -> Self {
        tracing::debug!(
            server = cages[Source::Server.index()].len(),
            get = cages[Source::Get.index()].len(),
            post = cages[Source::Post.index()].len(),
            cookie = cages[Source::Cookie.index()].len(),
            env = cages[Source::Env.index()].len(),
            files = cages[Source::Files.index()].len(),
            "supercage constructed"
        );
        Self { cages, catalog }
    }

    /// Returns the cage for the source called `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSource` (reported) if `name` is not a source.
    pub fn source(&self, name: &str) -> Result<&Cage, Error> {
        let source = self.catalog.settle(name.parse::<Source>())?;
        Ok(self.cage(source))
    }

    /// Returns the cage for `source`.
    pub fn cage(&self, source: Source) -> &Cage {
        &self.cages[source.index()]
    }

    /// The server metadata cage.
    pub fn server(&self) -> &Cage {
        self.cage(Source::Server)
    }

    /// The query string cage.
    pub fn get(&self) -> &Cage {
        self.cage(Source::Get)
    }

    /// The form body cage.
    pub fn post(&self) -> &Cage {
        self.cage(Source::Post)
    }

    /// The cookie cage.
    pub fn cookie(&self) -> &Cage {
        self.cage(Source::Cookie)
    }

    /// The environment cage.
    pub fn env(&self) -> &Cage {
        self.cage(Source::Env)
    }

    /// The uploaded files cage.
    pub fn files(&self) -> &Cage {
        self.cage(Source::Files)
    }

    /// Iterates over every source and its cage.
    pub fn iter(&self) -> impl Iterator<Item = (Source, &Cage)> {
        Source::ALL.into_iter().zip(self.cages.iter())
    }
}

impl fmt::Debug for Supercage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (source, cage) in self.iter() {
            map.entry(&source.name(), cage);
        }
        map.finish()
    }
}
