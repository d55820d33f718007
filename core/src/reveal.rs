#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealPhase {
    #[default]
    Unselected,
    /// A card is chosen and waiting for a tap or shake.
    Selected,
    /// The card has been shown; physics is running or the card has left.
    Revealed,
}

impl RevealPhase {
    pub fn can_select(self) -> bool {
        self != RevealPhase::Revealed
    }

    /// Shake detection only listens between selection and reveal.
    pub fn awaiting_reveal(self) -> bool {
        self == RevealPhase::Selected
    }

    pub fn select(&mut self) -> bool {
        if !self.can_select() {
            return false;
        }
        *self = RevealPhase::Selected;
        true
    }

    pub fn reveal(&mut self) -> bool {
        if !self.awaiting_reveal() {
            return false;
        }
        *self = RevealPhase::Revealed;
        true
    }
}
