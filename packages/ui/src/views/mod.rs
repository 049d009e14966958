mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod pagination;
pub use pagination::PageControls;

mod busy_indicator;
pub use busy_indicator::BusyIndicator;

pub mod form_modal;
pub use form_modal::{ChoiceOption, ChoiceOptions, FieldInput};

pub mod bulk_modal;

mod phones;
pub use phones::{PhoneBulkModal, PhoneListView, PhoneModal};

mod users;
pub use users::{UserBulkModal, UserCardsView, UserDetailView, UserModal};

mod orders;
pub use orders::{OrderBulkModal, OrderListView, OrderModal};
