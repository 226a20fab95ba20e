use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! attribute_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

attribute_enum!(Size {
    Small => "Small",
    Medium => "Medium",
    Large => "Large",
});

attribute_enum!(Origin {
    UnitedStates => "United States",
    Germany => "Germany",
    Japan => "Japan",
    Australia => "Australia",
});

attribute_enum!(Lifespan {
    TenToTwelve => "10 - 12 years",
    TwelveToFifteen => "12 - 15 years",
    FifteenToEighteen => "15 - 18 years",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Breed,
    Size,
    Origin,
    Lifespan,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Breed => "breed",
            AttributeKind::Size => "size",
            AttributeKind::Origin => "origin",
            AttributeKind::Lifespan => "lifespan",
        };
        f.write_str(name)
    }
}

/// A single ban-able value taken from a dog, tagged with the dimension it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub value: String,
}

/// A discovered dog. Fields are private so a committed dog cannot change after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    image_url: String,
    breed: String,
    size: Size,
    origin: Origin,
    lifespan: Lifespan,
}

impl Dog {
    pub fn new(
        image_url: impl Into<String>,
        breed: impl Into<String>,
        size: Size,
        origin: Origin,
        lifespan: Lifespan,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            breed: breed.into(),
            size,
            origin,
            lifespan,
        }
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn lifespan(&self) -> Lifespan {
        self.lifespan
    }

    /// Breed, size, origin and lifespan in display order.
    pub fn attributes(&self) -> [Attribute; 4] {
        [
            Attribute {
                kind: AttributeKind::Breed,
                value: self.breed.clone(),
            },
            Attribute {
                kind: AttributeKind::Size,
                value: self.size.label().to_string(),
            },
            Attribute {
                kind: AttributeKind::Origin,
                value: self.origin.label().to_string(),
            },
            Attribute {
                kind: AttributeKind::Lifespan,
                value: self.lifespan.label().to_string(),
            },
        ]
    }

    pub fn attribute_values(&self) -> [&str; 4] {
        [
            self.breed.as_str(),
            self.size.label(),
            self.origin.label(),
            self.lifespan.label(),
        ]
    }

    pub fn summary(&self) -> String {
        format!("A {} {} dog from {}", self.size, self.breed, self.origin)
    }
}
