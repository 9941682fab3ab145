mod portal;

pub use portal::{PartnerPortal, PortalBuilder, TypedPortalBuilder};
