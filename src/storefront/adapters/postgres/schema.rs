//! Diesel schema for the storefront tables.

diesel::table! {
    /// Countries.
    country (country_id) {
        /// Primary key.
        country_id -> Int4,
        /// Country name.
        #[sql_name = "country"]
        name -> Text,
        /// Last modification timestamp.
        last_update -> Timestamptz,
    }
}

diesel::table! {
    /// Cities, each in one country.
    city (city_id) {
        /// Primary key.
        city_id -> Int4,
        /// City name.
        #[sql_name = "city"]
        name -> Text,
        /// Owning country.
        country_id -> Int4,
        /// Last modification timestamp.
        last_update -> Timestamptz,
    }
}

diesel::table! {
    /// Postal addresses, each in one city.
    address (address_id) {
        /// Primary key.
        address_id -> Int4,
        /// First address line.
        #[sql_name = "address"]
        line1 -> Text,
        /// Second address line.
        #[sql_name = "address2"]
        line2 -> Nullable<Text>,
        /// District or region.
        district -> Text,
        /// Owning city.
        city_id -> Int4,
        /// Postal code.
        postal_code -> Nullable<Text>,
        /// Contact phone number.
        phone -> Text,
        /// Last modification timestamp.
        last_update -> Timestamptz,
    }
}

diesel::table! {
    /// Customers, each at one address.
    customer (customer_id) {
        /// Primary key.
        customer_id -> Int4,
        /// Store the customer is attached to.
        store_id -> Int4,
        /// Customer address.
        address_id -> Int4,
        /// Given name.
        first_name -> Text,
        /// Family name.
        last_name -> Text,
        /// Contact email.
        email -> Nullable<Text>,
        /// Social security number.
        ssn -> Nullable<Text>,
        /// Whether the account is active.
        active -> Bool,
        /// Creation date.
        create_date -> Date,
        /// Last modification timestamp.
        last_update -> Timestamptz,
    }
}

diesel::table! {
    /// Staff members, each at one address.
    staff (staff_id) {
        /// Primary key.
        staff_id -> Int4,
        /// Store the staff member works at.
        store_id -> Int4,
        /// Staff address.
        address_id -> Int4,
        /// Given name.
        first_name -> Text,
        /// Family name.
        last_name -> Text,
        /// Contact email.
        email -> Nullable<Text>,
        /// Login name.
        username -> Text,
        /// Stored credential.
        password -> Nullable<Text>,
        /// Whether the account is active.
        active -> Bool,
        /// Last modification timestamp.
        last_update -> Timestamptz,
    }
}

diesel::table! {
    /// Payments, each by one customer and taken by one staff member.
    payment (payment_id) {
        /// Primary key.
        payment_id -> Int4,
        /// Amount paid.
        amount -> Numeric,
        /// Paying customer.
        customer_id -> Int4,
        /// Staff member who took the payment.
        staff_id -> Int4,
        /// Settled rental.
        rental_id -> Nullable<Int4>,
        /// Card number.
        cc_number -> Nullable<Text>,
        /// Card expiration.
        cc_expiration -> Nullable<Text>,
        /// Card verification code.
        cc_cvv -> Nullable<Text>,
        /// When the payment was made.
        payment_date -> Timestamptz,
    }
}

diesel::joinable!(city -> country (country_id));
diesel::joinable!(address -> city (city_id));
diesel::joinable!(customer -> address (address_id));
diesel::joinable!(staff -> address (address_id));
diesel::joinable!(payment -> customer (customer_id));
diesel::joinable!(payment -> staff (staff_id));

diesel::allow_tables_to_appear_in_same_query!(address, city, country, customer, payment, staff);
