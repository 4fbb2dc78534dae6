use serde::{Deserialize, Deserializer};

/// One field of a partial update.
///
/// Keeps "not sent" apart from "sent as null" so a merge can treat them
/// differently. Pair with `#[serde(default)]` so an absent key becomes
/// [`Patch::Missing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Missing,
    Null,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<T> Patch<T> {
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_set_mut(&mut self) -> Option<&mut T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Overwrite `target` with the supplied value; `Missing` and `Null`
    /// leave it alone.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Set(v) = self {
            *target = v;
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|v| v.map_or(Patch::Null, Patch::Set))
    }
}
