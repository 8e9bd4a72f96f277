//! Port catalogue decoding.
//!
//! A catalogue is one JSON object whose keys are port identifiers and whose
//! values are port documents:
//!
//! ```json
//! {
//!   "AEAJM": { "name": "Ajman", "city": "Ajman", "coordinates": [55.51, 25.40] },
//!   "AEAUH": { "name": "Abu Dhabi", "city": "Abu Dhabi" }
//! }
//! ```
//!
//! Entries are decoded one at a time, in file order, so large catalogues are
//! never held in memory as a whole.

use crate::core_types::Port;
use serde::de::{Deserializer as _, MapAccess, Visitor};
use std::fmt;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("decoding port catalogue: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode a port catalogue from `reader`, calling `on_port` with the 1-based
/// position and the port for every entry. The entry key becomes the port `id`.
///
/// Returns the number of ports decoded.
///
/// # Errors
///
/// Returns [`LoadError::Decode`] if the input is not a JSON object of port
/// documents or has trailing content after it.
pub fn load_ports<R, F>(reader: R, mut on_port: F) -> Result<usize, LoadError>
where
    R: Read,
    F: FnMut(usize, Port),
{
    let mut de = serde_json::Deserializer::from_reader(reader);
    let count = (&mut de).deserialize_map(CatalogueVisitor {
        on_port: &mut on_port,
    })?;
    de.end()?;
    Ok(count)
}

struct CatalogueVisitor<'a, F> {
    on_port: &'a mut F,
}

impl<'de, F> Visitor<'de> for CatalogueVisitor<'_, F>
where
    F: FnMut(usize, Port),
{
    type Value = usize;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object of ports keyed by port identifier")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut count = 0;
        while let Some((port_id, mut port)) = map.next_entry::<String, Port>()? {
            count += 1;
            port.id = port_id;
            (self.on_port)(count, port);
        }
        Ok(count)
    }
}
