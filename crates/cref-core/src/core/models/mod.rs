//! # Models Module
//!
//! Plain data types shared by every layer of CReF++: the target [`sequence`], the sliding
//! [`fragment`] windows cut from it, structural-class labels ([`secondary`]), homology
//! search results ([`hit`]) and their [`search`] parameters, experimental torsion profiles
//! ([`torsion`]) and the per-fragment templates derived from them ([`candidate`]).

pub mod candidate;
pub mod fragment;
pub mod hit;
pub mod search;
pub mod secondary;
pub mod sequence;
pub mod torsion;
