//! Backend paths used by the order form.

pub const ACTIVE_CLIENTS: &str = "/clientes?activo=true";
pub const CLIENTS: &str = "/clientes";

pub const ACTIVE_SELLERS: &str = "/vendedores/activos";
pub const SELLERS: &str = "/vendedores";

pub const IN_STOCK_PRODUCTS: &str = "/productos/con-stock";
pub const PRODUCTS: &str = "/productos";

pub const ORDERS: &str = "/pedidos";
