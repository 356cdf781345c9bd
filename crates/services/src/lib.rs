//! # services
//!
//! The engagement-and-moderation core of Chorus: vote-toggle consistency,
//! flag authorization, tag-membership filtering, and reply-thread
//! maintenance, orchestrated by [`PostService`] against the `ItemStore`
//! port. Everything here that is not I/O is a pure function.

pub mod moderation;
pub mod posts;
pub mod replies;
pub mod tags;
pub mod vote;

pub use posts::PostService;
