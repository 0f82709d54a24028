mod envelope;
pub use self::envelope::{
    Link, Links, ListEnvelope, ListPage, MissingCollection, PageMetadata, SimpleValue,
};

mod error_body;
pub use self::error_body::{ErrorBody, FieldError};

mod booking;
pub use self::booking::{Booking, BookingStatus};

mod room;
pub use self::room::Room;
