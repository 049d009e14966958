mod shell;
pub use shell::{NotFound, Shell};

mod toolbar;
pub use toolbar::Toolbar;

mod phones;
pub use phones::{PhoneBulk, PhoneCreate, PhoneDelete, PhoneUpdate, Phones, PhonesPage};

mod users;
pub use users::{UserBulk, UserCreate, UserDelete, UserDetail, UserUpdate, Users, UsersPage};

mod orders;
pub use orders::{OrderBulk, OrderCreate, OrderDelete, OrderUpdate, Orders, OrdersPage};
