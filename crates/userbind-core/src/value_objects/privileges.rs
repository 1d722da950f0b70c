//! Account privilege bitflags
//!
//! Stored as BIGINT in the users table.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Platform-wide privileges held by an account
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Privileges: u64 {
        /// Can edit own profile and account settings
        const EDIT_OWN_PROFILE = 1 << 0;
        /// Can administer the domain (invite management, other users' settings)
        const MANAGE_DOMAIN    = 1 << 1;

        /// Granted to every newly registered account
        const DEFAULT = Self::EDIT_OWN_PROFILE.bits();
    }
}

impl Privileges {
    /// Check if the set grants a privilege.
    ///
    /// Domain managers pass every check.
    #[inline]
    pub fn has(&self, privilege: Privileges) -> bool {
        if self.contains(Privileges::MANAGE_DOMAIN) {
            return true;
        }
        self.contains(privilege)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.contains(Privileges::MANAGE_DOMAIN)
    }

    /// Get the raw bits as i64 (for database storage)
    #[inline]
    pub fn to_i64(self) -> i64 {
        self.bits() as i64
    }

    /// Create from raw i64 bits (from database)
    #[inline]
    pub fn from_i64(bits: i64) -> Self {
        Privileges::from_bits_truncate(bits as u64)
    }

    /// Names of the individual privileges that are set
    pub fn list(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

impl Default for Privileges {
    fn default() -> Self {
        Privileges::DEFAULT
    }
}

impl fmt::Display for Privileges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl Serialize for Privileges {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for Privileges {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PrivilegesVisitor;

        impl Visitor<'_> for PrivilegesVisitor {
            type Value = Privileges;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing privilege bits")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Privileges, E>
            where
                E: de::Error,
            {
                Ok(Privileges::from_i64(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Privileges, E>
            where
                E: de::Error,
            {
                Ok(Privileges::from_bits_truncate(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Privileges, E>
            where
                E: de::Error,
            {
                value
                    .parse::<u64>()
                    .map(Privileges::from_bits_truncate)
                    .map_err(|_| de::Error::custom("invalid privileges string"))
            }
        }

        deserializer.deserialize_any(PrivilegesVisitor)
    }
}

impl From<i64> for Privileges {
    fn from(bits: i64) -> Self {
        Privileges::from_i64(bits)
    }
}

impl From<Privileges> for i64 {
    fn from(privileges: Privileges) -> Self {
        privileges.to_i64()
    }
}
