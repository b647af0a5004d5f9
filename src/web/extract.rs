//! Extraction boundary trait for web integration.

use crate::{CageOptions, Catalog, Container, Source, Supercage};

/// Extracts per-source input bags from a framework-specific request.
///
/// Framework integrations implement this trait to hand raw request data to
/// the cages. Implementations only map framework types to bags; filtering
/// happens when the cage is read.
///
/// Sources an implementation does not return get an empty cage.
///
/// # Examples
///
/// ```
/// use input_cage::web::ExtractSources;
/// use input_cage::{CageOptions, Catalog, Container, Source, Value};
///
/// struct MyFrameworkRequest {
///     query: Vec<(String, String)>,
/// }
///
/// impl ExtractSources for MyFrameworkRequest {
///     fn extract_sources(&self) -> Vec<(Source, Container)> {
///         let query: Container = self.query.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
///         vec![(Source::Get, query)]
///     }
/// }
///
/// let request = MyFrameworkRequest {
///     query: vec![("page".to_string(), "2".to_string())],
/// };
/// let cages = request.build_supercage(CageOptions::default(), Catalog::default());
/// assert_eq!(cages.get().get_int("page").unwrap().into_inner(), Value::from(2));
/// ```
pub trait ExtractSources {
    /// Returns the raw bag for each source the request carries.
    fn extract_sources(&self) -> Vec<(Source, Container)>;

    /// Builds a supercage over the extracted bags.
    fn build_supercage(&self, options: CageOptions, catalog: Catalog) -> Supercage {
        Supercage::new(self.extract_sources(), options, catalog)
    }
}
