mod engine;

pub(crate) use engine::{CoreOutput, GestureCore, GestureHsmEvent, Lifted};
