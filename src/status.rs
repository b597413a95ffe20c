const SELECTED: u8 = 1 << 0;

/// Per element flags.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Status {
    flags: u8,
}

impl Status {
    fn check(&self, i: u8) -> bool {
        self.flags & i > 0
    }

    fn set(&mut self, i: u8, flag: bool) {
        if flag {
            self.flags |= i;
        } else {
            self.flags &= !i;
        }
    }

    pub fn selected(&self) -> bool {
        self.check(SELECTED)
    }

    pub fn set_selected(&mut self, flag: bool) {
        self.set(SELECTED, flag)
    }
}

#[cfg(test)]
mod test {
    use super::Status;

    #[test]
    fn t_select_toggle() {
        let mut s = Status::default();
        assert!(!s.selected());
        s.set_selected(true);
        assert!(s.selected());
        s.set_selected(false);
        assert_eq!(s, Status::default());
    }
}
