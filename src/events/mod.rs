//! Event surfaces built on the invocation bridge.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ListenerProxy`] | Listener operations over one resolved event member |
//! | [`EventFacade`] | A fixed, named event |
//! | [`DeclarativeEventFacade`] | An event with `addRules`/`getRules`/`removeRules` |
//! | [`VariantRuleValidator`] | Closed-set checks on rule actions and conditions |

mod facade;
mod listener_proxy;
mod rules;

pub use facade::{DeclarativeEventFacade, EventFacade};
pub use listener_proxy::ListenerProxy;
pub use rules::{Rule, RuleValidator, VariantRuleValidator, INSTANCE_TYPE};
