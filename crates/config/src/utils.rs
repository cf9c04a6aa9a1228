use serde::{de, Serializer};

/// Deserializes a u64 value from either a native integer or a string
pub fn u64_from_anything<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct U64Visitor;

    impl de::Visitor<'_> for U64Visitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(formatter, "a u64 or a string representing a u64")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u64::try_from(v).map_err(|_| E::custom(format!("i64 value {v} out of range for u64")))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.parse::<u64>()
                .map_err(|_| E::custom(format!("invalid u64 string: {v}")))
        }
    }

    deserializer.deserialize_any(U64Visitor)
}

/// Deserializes a u8 value from either a native integer or a string
pub fn u8_from_anything<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = u64_from_anything(deserializer)?;
    u8::try_from(v).map_err(|_| de::Error::custom(format!("value {v} out of range for u8")))
}

/// Serde for wei amounts: TOML integers stop at `i64::MAX`, which is about
/// 9.2 ether, so amounts are written as decimal strings.
pub mod wei {
    use super::*;

    pub fn serialize<S>(amount: &u128, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct WeiVisitor;

        impl de::Visitor<'_> for WeiVisitor {
            type Value = u128;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "an amount in wei, as an integer or a decimal string")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(u128::from(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u128::try_from(v).map_err(|_| E::custom(format!("negative amount: {v}")))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse::<u128>()
                    .map_err(|_| E::custom(format!("invalid amount string: {v}")))
            }
        }

        deserializer.deserialize_any(WeiVisitor)
    }
}

/// Serde for generalized indices, written as `0x`-prefixed hex strings.
pub mod gindex {
    use super::*;

    pub fn serialize<S>(gindex: &u64, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.serialize_str(&format!("{gindex:#x}"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);

        u64::from_str_radix(digits, 16)
            .map_err(|e| de::Error::custom(format!("invalid generalized index {s}: {e}")))
    }
}
