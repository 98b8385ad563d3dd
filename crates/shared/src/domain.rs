use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PageNumber, u32);
id_newtype!(NodeId, usize);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn is_first(self) -> bool {
        self.0 == 1
    }
}

/// Visibility phase of the search results modal. One per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Loading,
    Open,
}

impl ModalState {
    /// Whether the search box belongs in the modal mount for this state.
    pub fn search_box_in_modal(self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModalState::Closed => "closed",
            ModalState::Loading => "loading",
            ModalState::Open => "open",
        };
        f.write_str(name)
    }
}
