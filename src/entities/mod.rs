pub mod currency_amount;
pub mod pool;
pub mod price;
pub mod tick_list;
pub mod token;
