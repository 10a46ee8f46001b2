//! The `define_id_types` macro.

/// Defines newtypes that wrap a single small integer ID.
///
/// Each use names the type, the int type that backs it, and how many
/// distinct values the type has.  Numerals, locations, and the various
/// unit kinds of the grid are all ID types.
#[macro_export]
macro_rules! define_id_types {
    (
        $(
            $(#[$outer:meta])*
            $type_name:ident : $int_type:ty[$count:expr];
        )*
    ) => {
        $(
            define_id_types!(
                @one $(#[$outer])* $type_name, $int_type, $count,
                concat!("How many distinct `", stringify!($type_name), "` values exist."),
                concat!(
                    "Makes a `", stringify!($type_name),
                    "` from its ID without checking the range.\n\n# Safety\n\nCallers must ensure the ID is in 0..",
                    stringify!($count), "."),
                concat!(
                    "Makes a `", stringify!($type_name),
                    "` from its ID, if it lies in 0..", stringify!($count), "."),
                concat!("Returns this `", stringify!($type_name), "`'s ID."),
                concat!("Returns this `", stringify!($type_name), "`'s 1-based ordinal number."),
                concat!("Returns this `", stringify!($type_name), "`'s ID as an array index."),
                concat!("Iterates every `", stringify!($type_name), "` in ID order.")
            );
        )*
    };
    (
        @one
        $(#[$outer:meta])*
        $type_name:ident, $int_type:ty, $count:expr,
        $count_doc:expr,
        $new_unchecked_doc:expr,
        $new_doc:expr,
        $get_doc:expr,
        $ordinal_doc:expr,
        $index_doc:expr,
        $all_doc:expr
    ) => {
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        $(#[$outer])*
        pub struct $type_name($int_type);

        impl $type_name {
            #[doc = $count_doc]
            pub const COUNT: usize = $count;

            #[doc = $new_unchecked_doc]
            pub const unsafe fn new_unchecked(id: $int_type) -> Self {
                $type_name(id)
            }

            #[doc = $new_doc]
            pub const fn new(id: $int_type) -> Option<Self> {
                if id >= 0 && id < $count {
                    Some($type_name(id))
                } else {
                    None
                }
            }

            #[doc = $new_doc]
            pub const fn from_index(i: usize) -> Option<Self> {
                if i < $count {
                    Some($type_name(i as $int_type))
                } else {
                    None
                }
            }

            #[doc = $get_doc]
            pub const fn get(self) -> $int_type {
                self.0
            }

            #[doc = $ordinal_doc]
            pub const fn ordinal(self) -> $int_type {
                self.0 + 1
            }

            #[doc = $index_doc]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[doc = $all_doc]
            pub fn all() -> impl Iterator<Item = Self> {
                (0..$count).map(|id| unsafe { Self::new_unchecked(id) })
            }
        }

        impl TryFrom<$int_type> for $type_name {
            type Error = &'static str;
            #[doc = $new_doc]
            fn try_from(id: $int_type) -> Result<Self, Self::Error> {
                $type_name::new(id).ok_or("ID out of range")
            }
        }
    };
}
