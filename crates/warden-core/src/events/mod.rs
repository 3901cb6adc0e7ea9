//! Inbound platform events

mod inbound_event;

pub use inbound_event::{
    InboundEvent, InteractionRef, MemberJoined, MessageAuthor, MessagePosted, SelectionMade,
};
