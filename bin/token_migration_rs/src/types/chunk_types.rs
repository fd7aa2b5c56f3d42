use ethers::types::Address;

/// Contiguous slice of the address universe submitted as one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressChunk<'a> {
    pub index: usize,
    pub addresses: &'a [Address],
}

impl<'a> AddressChunk<'a> {
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn first_address(&self) -> Option<Address> {
        self.addresses.first().copied()
    }
}
