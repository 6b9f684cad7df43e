pub mod bit_vec;
pub mod override_list;
pub mod record;
