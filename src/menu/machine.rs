use std::rc::Rc;

use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Step of an in-page navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavStage {
    /// Menu content fading before the cover comes in.
    FadingMenu,
    /// Cover panels sliding over the viewport.
    Covering,
    /// Cover sliding away after the jump.
    Revealing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub anchor: String,
    pub stage: NavStage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Toggle,
    /// Escape key or backdrop; only acts on an open menu.
    Close,
    TransitionDone,
    Navigate(String),
    NavStageDone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuMachine {
    pub phase: MenuPhase,
    pub navigation: Option<Navigation>,
}

impl Default for MenuMachine {
    fn default() -> Self {
        Self {
            phase: MenuPhase::Closed,
            navigation: None,
        }
    }
}

impl MenuMachine {
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, MenuPhase::Opening | MenuPhase::Closing) || self.navigation.is_some()
    }

    pub fn locks_scroll(&self) -> bool {
        matches!(self.phase, MenuPhase::Opening | MenuPhase::Open | MenuPhase::Closing)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, MenuPhase::Opening | MenuPhase::Open)
    }

    /// Next state for `action`, or `None` when the action is rejected.
    pub fn next(&self, action: &MenuAction) -> Option<Self> {
        let mut next = self.clone();
        match action {
            MenuAction::Toggle => {
                if self.is_transitioning() {
                    return None;
                }
                next.phase = match self.phase {
                    MenuPhase::Closed => MenuPhase::Opening,
                    MenuPhase::Open => MenuPhase::Closing,
                    MenuPhase::Opening | MenuPhase::Closing => return None,
                };
            }
            MenuAction::Close => {
                if self.is_transitioning() || self.phase != MenuPhase::Open {
                    return None;
                }
                next.phase = MenuPhase::Closing;
            }
            MenuAction::TransitionDone => {
                next.phase = match self.phase {
                    MenuPhase::Opening => MenuPhase::Open,
                    MenuPhase::Closing => MenuPhase::Closed,
                    MenuPhase::Open | MenuPhase::Closed => return None,
                };
            }
            MenuAction::Navigate(anchor) => {
                if self.is_transitioning() {
                    return None;
                }
                let stage = if self.phase == MenuPhase::Open {
                    NavStage::FadingMenu
                } else {
                    NavStage::Covering
                };
                next.navigation = Some(Navigation {
                    anchor: anchor.clone(),
                    stage,
                });
            }
            MenuAction::NavStageDone => {
                let navigation = self.navigation.as_ref()?;
                match navigation.stage {
                    NavStage::FadingMenu => {
                        next.navigation = Some(Navigation {
                            anchor: navigation.anchor.clone(),
                            stage: NavStage::Covering,
                        });
                    }
                    NavStage::Covering => {
                        // The page is hidden: the menu can close without a transition.
                        next.phase = MenuPhase::Closed;
                        next.navigation = Some(Navigation {
                            anchor: navigation.anchor.clone(),
                            stage: NavStage::Revealing,
                        });
                    }
                    NavStage::Revealing => next.navigation = None,
                }
            }
        }
        Some(next)
    }
}

impl Reducible for MenuMachine {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match self.next(&action) {
            Some(next) => Rc::new(next),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: &Rc<MenuMachine>, action: MenuAction) -> Rc<MenuMachine> {
        state.clone().reduce(action)
    }

    #[test]
    fn full_open_close_cycle() {
        let s = Rc::new(MenuMachine::default());
        let s = reduce(&s, MenuAction::Toggle);
        assert_eq!(s.phase, MenuPhase::Opening);
        assert!(s.locks_scroll());
        let s = reduce(&s, MenuAction::TransitionDone);
        assert_eq!(s.phase, MenuPhase::Open);
        let s = reduce(&s, MenuAction::Toggle);
        assert_eq!(s.phase, MenuPhase::Closing);
        assert!(s.locks_scroll());
        let s = reduce(&s, MenuAction::TransitionDone);
        assert_eq!(s.phase, MenuPhase::Closed);
        assert!(!s.locks_scroll());
    }

    #[test]
    fn toggle_while_transitioning_is_rejected() {
        let opening = reduce(&Rc::new(MenuMachine::default()), MenuAction::Toggle);
        let after = reduce(&opening, MenuAction::Toggle);
        assert!(Rc::ptr_eq(&opening, &after));

        let navigating = reduce(&Rc::new(MenuMachine::default()), MenuAction::Navigate("about".into()));
        let after = reduce(&navigating, MenuAction::Toggle);
        assert!(Rc::ptr_eq(&navigating, &after));
        let after = reduce(&navigating, MenuAction::Navigate("services".into()));
        assert!(Rc::ptr_eq(&navigating, &after));
    }

    #[test]
    fn navigating_from_open_menu_fades_first() {
        let s = Rc::new(MenuMachine {
            phase: MenuPhase::Open,
            navigation: None,
        });
        let s = reduce(&s, MenuAction::Navigate("projects".into()));
        assert_eq!(s.navigation.as_ref().map(|n| n.stage.clone()), Some(NavStage::FadingMenu));
        assert!(s.locks_scroll());
        let s = reduce(&s, MenuAction::NavStageDone);
        assert_eq!(s.navigation.as_ref().map(|n| n.stage.clone()), Some(NavStage::Covering));
        let s = reduce(&s, MenuAction::NavStageDone);
        assert_eq!(s.phase, MenuPhase::Closed);
        assert_eq!(s.navigation.as_ref().map(|n| n.stage.clone()), Some(NavStage::Revealing));
        let s = reduce(&s, MenuAction::NavStageDone);
        assert_eq!(*s, MenuMachine::default());
    }

    #[test]
    fn navigating_from_closed_menu_covers_directly() {
        let s = reduce(&Rc::new(MenuMachine::default()), MenuAction::Navigate("contact".into()));
        assert_eq!(s.navigation.as_ref().map(|n| n.stage.clone()), Some(NavStage::Covering));
        assert!(!s.locks_scroll());
    }

    #[test]
    fn close_only_acts_on_open_menu() {
        let closed = Rc::new(MenuMachine::default());
        assert!(Rc::ptr_eq(&closed, &reduce(&closed, MenuAction::Close)));
        let open = Rc::new(MenuMachine {
            phase: MenuPhase::Open,
            navigation: None,
        });
        assert_eq!(reduce(&open, MenuAction::Close).phase, MenuPhase::Closing);
    }

    #[test]
    fn stray_completion_is_ignored() {
        let closed = Rc::new(MenuMachine::default());
        assert!(Rc::ptr_eq(&closed, &reduce(&closed, MenuAction::TransitionDone)));
        assert!(Rc::ptr_eq(&closed, &reduce(&closed, MenuAction::NavStageDone)));
    }
}
