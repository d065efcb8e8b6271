pub mod application {
    pub mod cart {
        pub mod store;
    }
    pub mod wishlist {
        pub mod store;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod cart {
        pub mod errors;
        pub mod model;
        pub mod observer;
        pub mod storage;
    }
    pub mod wishlist {
        pub mod errors;
        pub mod storage;
    }
}
