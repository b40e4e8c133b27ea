use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CowVec;
use super::snapshot::Snapshot;

/// Serializes the currently published store as a sequence.
impl<T> Serialize for CowVec<T>
where
    T: Serialize + Send + Sync + 'static,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.lock().as_slice().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for CowVec<T>
where
    T: Deserialize<'de> + Send + Sync + 'static,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(CowVec::from)
    }
}

impl<T> Serialize for Snapshot<T>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl<T> CowVec<T>
where
    T: Send + Sync + 'static,
{
    /// Serializes a snapshot of the contents into bincode bytes (standard
    /// configuration).
    #[must_use = "Bincode serialization output must serve a purpose!"]
    pub fn to_bincode(&self) -> anyhow::Result<Vec<u8>>
    where
        T: Serialize,
    {
        Ok(bincode::serde::encode_to_vec(
            self.lock().as_slice(),
            bincode::config::standard(),
        )?)
    }

    /// Reconstructs a container from bincode bytes produced by
    /// [`to_bincode`](CowVec::to_bincode).
    pub fn from_bincode(bytes: &[u8]) -> anyhow::Result<Self>
    where
        T: DeserializeOwned,
    {
        let (store, _) =
            bincode::serde::decode_from_slice::<Vec<T>, _>(bytes, bincode::config::standard())?;
        Ok(Self::from(store))
    }
}
