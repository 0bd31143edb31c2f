/// Which node the detail panel is showing. At most one at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Selected(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionAction {
	Click(String),
	Close,
}

impl Selection {
	pub fn next(self, action: SelectionAction) -> Selection {
		match action {
			SelectionAction::Click(id) => Selection::Selected(id),
			SelectionAction::Close => Selection::None,
		}
	}

	pub fn selected_id(&self) -> Option<&str> {
		match self {
			Selection::None => None,
			Selection::Selected(id) => Some(id),
		}
	}
}
