use crate::{GrowthPolicy, LenType, LocalVec};
use serde::{
    de::{Deserialize, Deserializer, SeqAccess, Visitor},
    ser::{Serialize, SerializeSeq, Serializer},
};
use std::{
    fmt::{self, Formatter},
    marker::PhantomData,
};

impl<T, L, P> Serialize for LocalVec<T, L, P>
where
    T: Serialize,
    L: LenType,
    P: GrowthPolicy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T, L, P> Deserialize<'de> for LocalVec<T, L, P>
where
    T: Deserialize<'de>,
    L: LenType,
    P: GrowthPolicy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(LocalVecVisitor(PhantomData))
    }
}

struct LocalVecVisitor<T, L, P>(PhantomData<LocalVec<T, L, P>>)
where
    L: LenType,
    P: GrowthPolicy;

impl<'de, T, L, P> Visitor<'de> for LocalVecVisitor<T, L, P>
where
    T: Deserialize<'de>,
    L: LenType,
    P: GrowthPolicy,
{
    type Value = LocalVec<T, L, P>;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut out = LocalVec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(next) = seq.next_element()? {
            out.push(next);
        }
        Ok(out)
    }
}
