use std::collections::HashMap;

type Handler<A> = Box<dyn Fn(A)>;

/// Named entry points reachable from page markup.
pub struct CommandRegistry<A> {
    handlers: HashMap<&'static str, Handler<A>>,
}

impl<A> Default for CommandRegistry<A> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<A> CommandRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any earlier handler.
    pub fn register(&mut self, name: &'static str, handler: impl Fn(A) + 'static) {
        self.handlers.insert(name, Box::new(handler));
    }

    /// Runs the handler for `name`; returns false when none is registered.
    pub fn dispatch(&self, name: &str, args: A) -> bool {
        match self.handlers.get(name) {
            Some(handler) => {
                handler(args);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn dispatch_reaches_registered_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = CommandRegistry::new();
        {
            let seen = seen.clone();
            registry.register("changeGalleryImage", move |src: String| {
                seen.borrow_mut().push(src);
            });
        }

        assert!(registry.dispatch("changeGalleryImage", "b.jpg".to_string()));
        assert_eq!(*seen.borrow(), vec!["b.jpg".to_string()]);
    }

    #[test]
    fn unknown_command_is_reported() {
        let registry: CommandRegistry<()> = CommandRegistry::new();
        assert!(!registry.dispatch("missing", ()));
        assert_eq!(registry.names().count(), 0);
    }

    #[test]
    fn re_registering_replaces_the_handler() {
        let hits = Rc::new(RefCell::new(0));
        let mut registry = CommandRegistry::new();
        registry.register("go", |_: ()| {});
        {
            let hits = hits.clone();
            registry.register("go", move |_: ()| *hits.borrow_mut() += 1);
        }

        registry.dispatch("go", ());
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["go"]);
    }
}
