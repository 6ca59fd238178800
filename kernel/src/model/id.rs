use serde::{Deserialize, Serialize};

// ID は整数連番（BIGSERIAL）を使うため、i64 のニュータイプとして定義する
macro_rules! define_id {
    ($id_type:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $id_type(i64);

        impl $id_type {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn raw(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $id_type {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $id_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(FacilityId);
define_id!(OpenHoursId);
define_id!(ReservationId);
define_id!(ReservationStatusId);
define_id!(UserId);
