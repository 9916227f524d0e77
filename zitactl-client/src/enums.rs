//! Protobuf enums exchanged with Zitadel.
//!
//! Each enum serializes to its protobuf name (the proto3 JSON form) and
//! accepts either the name or the numeric value when decoding. The
//! zero-valued variant is the `Default`, which is what proto3 JSON implies
//! when a field is omitted. Names or numbers this client does not know, such
//! as values added by a newer Zitadel, also decode to the `Default`.

use serde::de::{self, Visitor};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Common behaviour of the generated protobuf enums.
pub trait ProtoEnum: Sized + Copy + Default + 'static {
    /// All variants in declaration order.
    const VARIANTS: &'static [Self];

    /// The protobuf name, e.g. `OIDC_APP_TYPE_WEB`.
    fn as_str(&self) -> &'static str;

    /// The protobuf number.
    fn number(&self) -> i32;

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == name)
    }

    fn from_number(number: i64) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| i64::from(v.number()) == number)
    }

    /// Protobuf names of all variants.
    fn names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|v| v.as_str()).collect()
    }
}

struct ProtoEnumVisitor<E>(PhantomData<E>);

impl<'de, E: ProtoEnum> Visitor<'de> for ProtoEnumVisitor<E> {
    type Value = E;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "one of {:?} or its number", E::names())
    }

    fn visit_str<DE: de::Error>(self, v: &str) -> Result<E, DE> {
        Ok(E::from_name(v).unwrap_or_else(|| {
            debug!(value = v, "unrecognised enum name, using default");
            E::default()
        }))
    }

    fn visit_i64<DE: de::Error>(self, v: i64) -> Result<E, DE> {
        Ok(E::from_number(v).unwrap_or_else(|| {
            debug!(value = v, "unrecognised enum number, using default");
            E::default()
        }))
    }

    fn visit_u64<DE: de::Error>(self, v: u64) -> Result<E, DE> {
        match i64::try_from(v) {
            Ok(v) => self.visit_i64(v),
            Err(_) => Ok(E::default()),
        }
    }
}

macro_rules! proto_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($(#[$vmeta:meta])* $variant:ident = $number:literal => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl ProtoEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            fn number(&self) -> i32 {
                match self {
                    $(Self::$variant => $number),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as ProtoEnum>::from_name(s).ok_or_else(|| {
                    format!(
                        "'{}' is not valid, valid values are: {}",
                        s,
                        <Self as ProtoEnum>::names().join(", ")
                    )
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(ProtoEnumVisitor::<Self>(PhantomData))
            }
        }
    };
}

proto_enum! {
    /// How a text query matches (`zitadel.object.v2.TextQueryMethod`).
    TextQueryMethod, default = Equals {
        Equals = 0 => "TEXT_QUERY_METHOD_EQUALS",
        EqualsIgnoreCase = 1 => "TEXT_QUERY_METHOD_EQUALS_IGNORE_CASE",
        StartsWith = 2 => "TEXT_QUERY_METHOD_STARTS_WITH",
        StartsWithIgnoreCase = 3 => "TEXT_QUERY_METHOD_STARTS_WITH_IGNORE_CASE",
        Contains = 4 => "TEXT_QUERY_METHOD_CONTAINS",
        ContainsIgnoreCase = 5 => "TEXT_QUERY_METHOD_CONTAINS_IGNORE_CASE",
        EndsWith = 6 => "TEXT_QUERY_METHOD_ENDS_WITH",
        EndsWithIgnoreCase = 7 => "TEXT_QUERY_METHOD_ENDS_WITH_IGNORE_CASE",
    }
}

proto_enum! {
    /// Lifecycle state of an organization.
    OrganizationState, default = Unspecified {
        Unspecified = 0 => "ORGANIZATION_STATE_UNSPECIFIED",
        Active = 1 => "ORGANIZATION_STATE_ACTIVE",
        Inactive = 2 => "ORGANIZATION_STATE_INACTIVE",
        Removed = 3 => "ORGANIZATION_STATE_REMOVED",
    }
}

proto_enum! {
    /// Where private labeling is taken from.
    PrivateLabelingSetting, default = Unspecified {
        Unspecified = 0 => "PRIVATE_LABELING_SETTING_UNSPECIFIED",
        EnforceProjectResourceOwnerPolicy = 1 => "PRIVATE_LABELING_SETTING_ENFORCE_PROJECT_RESOURCE_OWNER_POLICY",
        AllowLoginUserResourceOwnerPolicy = 2 => "PRIVATE_LABELING_SETTING_ALLOW_LOGIN_USER_RESOURCE_OWNER_POLICY",
    }
}

proto_enum! {
    /// Lifecycle state of a project.
    ProjectState, default = Unspecified {
        Unspecified = 0 => "PROJECT_STATE_UNSPECIFIED",
        Active = 1 => "PROJECT_STATE_ACTIVE",
        Inactive = 2 => "PROJECT_STATE_INACTIVE",
    }
}

proto_enum! {
    /// Lifecycle state of an application.
    AppState, default = Unspecified {
        Unspecified = 0 => "APP_STATE_UNSPECIFIED",
        Active = 1 => "APP_STATE_ACTIVE",
        Inactive = 2 => "APP_STATE_INACTIVE",
        Removed = 3 => "APP_STATE_REMOVED",
    }
}

proto_enum! {
    OidcResponseType, default = Unspecified {
        Unspecified = 0 => "OIDC_RESPONSE_TYPE_UNSPECIFIED",
        Code = 1 => "OIDC_RESPONSE_TYPE_CODE",
        IdToken = 2 => "OIDC_RESPONSE_TYPE_ID_TOKEN",
        IdTokenToken = 3 => "OIDC_RESPONSE_TYPE_ID_TOKEN_TOKEN",
    }
}

proto_enum! {
    OidcGrantType, default = AuthorizationCode {
        AuthorizationCode = 0 => "OIDC_GRANT_TYPE_AUTHORIZATION_CODE",
        Implicit = 1 => "OIDC_GRANT_TYPE_IMPLICIT",
        RefreshToken = 2 => "OIDC_GRANT_TYPE_REFRESH_TOKEN",
        DeviceCode = 3 => "OIDC_GRANT_TYPE_DEVICE_CODE",
        TokenExchange = 4 => "OIDC_GRANT_TYPE_TOKEN_EXCHANGE",
    }
}

proto_enum! {
    OidcAppType, default = Web {
        Web = 0 => "OIDC_APP_TYPE_WEB",
        UserAgent = 1 => "OIDC_APP_TYPE_USER_AGENT",
        Native = 2 => "OIDC_APP_TYPE_NATIVE",
    }
}

proto_enum! {
    OidcAuthMethodType, default = Basic {
        Basic = 0 => "OIDC_AUTH_METHOD_TYPE_BASIC",
        Post = 1 => "OIDC_AUTH_METHOD_TYPE_POST",
        NoAuthentication = 2 => "OIDC_AUTH_METHOD_TYPE_NONE",
        PrivateKeyJwt = 3 => "OIDC_AUTH_METHOD_TYPE_PRIVATE_KEY_JWT",
    }
}

proto_enum! {
    OidcVersion, default = V1 {
        V1 = 0 => "OIDC_VERSION_1_0",
    }
}

proto_enum! {
    OidcTokenType, default = Bearer {
        Bearer = 0 => "OIDC_TOKEN_TYPE_BEARER",
        Jwt = 1 => "OIDC_TOKEN_TYPE_JWT",
    }
}
