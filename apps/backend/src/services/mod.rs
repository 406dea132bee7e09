//! Service layer: the single choke point through which the websocket and
//! polling surfaces read and mutate the estimation session.

pub mod estimation;
