use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! numeric_id {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(pub u64);

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl FromStr for $name {
                type Err = std::num::ParseIntError;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    raw.trim().parse::<u64>().map(Self)
                }
            }
        )+
    };
}

numeric_id!(
    UserId,
    EventId,
    CategoryId,
    VenueId,
    TicketTypeId,
    TicketId,
    AttendeeId,
    SponsorId,
    SponsorTierId,
    SponsorshipId,
);

/// Public ticket identifier printed on the ticket and used at the door.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TicketCode(pub Uuid);

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketCode {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw.trim()).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventId, TicketCode};

    #[test]
    fn numeric_ids_parse_with_surrounding_whitespace() {
        assert_eq!(" 42 ".parse::<EventId>().expect("valid id"), EventId(42));
        assert!("forty-two".parse::<EventId>().is_err());
    }

    #[test]
    fn ticket_codes_round_trip_through_display() {
        let raw = "3f2b8c1e-9a4d-4f6e-8b7a-1c2d3e4f5a6b";
        let code: TicketCode = raw.parse().expect("valid uuid");
        assert_eq!(code.to_string(), raw);
    }
}
